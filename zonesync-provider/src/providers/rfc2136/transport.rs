//! Single-exchange UDP transport.
//!
//! One message out, one response in, on a fresh ephemeral socket per call.
//! No retry and no timeout live here — retry policy belongs to the caller,
//! and callers needing bounded latency wrap the future with a deadline.

use hickory_proto::op::{Message, ResponseCode};
use tokio::net::{UdpSocket, lookup_host};

use crate::error::{ProviderError, Result};

use super::PROVIDER_ID;

/// Largest response we accept. Update responses carry no record data, but
/// servers may echo the request sections back.
const MAX_RESPONSE_SIZE: usize = 4096;

/// Sends `message` to `nameserver` and validates the response.
///
/// A response whose code is not success yields
/// [`ProviderError::ServerRejected`] naming the symbolic code; network
/// failures yield [`ProviderError::NetworkError`]; an undecodable response or
/// a response id mismatch yields [`ProviderError::ParseError`].
pub(crate) async fn send_message(nameserver: &str, message: &Message) -> Result<Message> {
    let wire = message
        .to_vec()
        .map_err(|e| parse_error(format!("failed to encode message: {e}")))?;

    let addr = lookup_host(nameserver)
        .await
        .map_err(|e| network_error(format!("failed to resolve '{nameserver}': {e}")))?
        .next()
        .ok_or_else(|| network_error(format!("'{nameserver}' resolved to no addresses")))?;

    let bind_addr = if addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
    let socket = UdpSocket::bind(bind_addr)
        .await
        .map_err(|e| network_error(format!("failed to bind socket: {e}")))?;
    socket
        .connect(addr)
        .await
        .map_err(|e| network_error(format!("failed to connect to '{nameserver}': {e}")))?;

    socket
        .send(&wire)
        .await
        .map_err(|e| network_error(format!("send to '{nameserver}' failed: {e}")))?;

    let mut buf = vec![0u8; MAX_RESPONSE_SIZE];
    let len = socket
        .recv(&mut buf)
        .await
        .map_err(|e| network_error(format!("receive from '{nameserver}' failed: {e}")))?;

    let response = Message::from_vec(&buf[..len])
        .map_err(|e| parse_error(format!("failed to decode response: {e}")))?;

    if response.id() != message.id() {
        return Err(parse_error(format!(
            "response id {} does not match query id {}",
            response.id(),
            message.id()
        )));
    }

    if response.response_code() != ResponseCode::NoError {
        return Err(ProviderError::ServerRejected {
            provider: PROVIDER_ID.to_string(),
            rcode: format!("{:?}", response.response_code()),
        });
    }

    Ok(response)
}

fn network_error(detail: String) -> ProviderError {
    ProviderError::NetworkError {
        provider: PROVIDER_ID.to_string(),
        detail,
    }
}

fn parse_error(detail: String) -> ProviderError {
    ProviderError::ParseError {
        provider: PROVIDER_ID.to_string(),
        detail,
    }
}
