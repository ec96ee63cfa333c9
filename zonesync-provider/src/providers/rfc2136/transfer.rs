//! AXFR zone transfer session.
//!
//! A transfer is one TCP session carrying 2-byte length-prefixed DNS
//! messages: the query out, then one or more response messages ("envelopes")
//! back. The stream of answer records is bracketed by the zone's SOA — the
//! transfer is complete when the SOA appears a second time.
//!
//! Establishment failures (connect error, undecodable or refused first
//! response) are hard errors. After establishment, each envelope is surfaced
//! to the caller individually so that a malformed envelope can be skipped
//! without discarding the records already received.

use std::io;

use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, Record, RecordType};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::{ProviderError, Result};

use super::PROVIDER_ID;

/// One AXFR response message, as seen by the consumer.
pub(crate) enum Envelope {
    /// The envelope's answer records (possibly empty).
    Records(Vec<Record>),
    /// The envelope could not be used; the session continues.
    Malformed(String),
}

/// An established zone-transfer session.
///
/// A finite, pull-based stream of [`Envelope`]s. Not restartable: once
/// [`next_envelope`](Self::next_envelope) returns `None` the session is over.
pub(crate) struct ZoneTransfer {
    stream: TcpStream,
    query_id: u16,
    first: Option<Vec<Record>>,
    soa_count: u8,
    done: bool,
}

impl ZoneTransfer {
    /// Opens a transfer session for `zone` against `nameserver`.
    ///
    /// Connects, sends the AXFR query and validates the first response.
    /// Any failure up to that point aborts with
    /// [`ProviderError::TransferFailed`] — no partial result exists yet.
    pub(crate) async fn request(nameserver: &str, zone: &Name) -> Result<Self> {
        let mut query = Message::new();
        query
            .set_id(rand::random())
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(false);
        query.add_query(Query::query(zone.clone(), RecordType::AXFR));

        let wire = query
            .to_vec()
            .map_err(|e| transfer_failed(zone, format!("failed to encode query: {e}")))?;

        let mut stream = TcpStream::connect(nameserver)
            .await
            .map_err(|e| transfer_failed(zone, format!("connect to '{nameserver}' failed: {e}")))?;

        let frame_len = u16::try_from(wire.len())
            .map_err(|_| transfer_failed(zone, "query exceeds the TCP message size".to_string()))?;
        stream
            .write_all(&frame_len.to_be_bytes())
            .await
            .map_err(|e| transfer_failed(zone, format!("failed to send query: {e}")))?;
        stream
            .write_all(&wire)
            .await
            .map_err(|e| transfer_failed(zone, format!("failed to send query: {e}")))?;

        // 首个响应决定会话是否建立
        let first = match read_frame(&mut stream).await {
            Ok(Some(frame)) => Message::from_vec(&frame)
                .map_err(|e| transfer_failed(zone, format!("undecodable response: {e}")))?,
            Ok(None) => {
                return Err(transfer_failed(
                    zone,
                    "connection closed before any response".to_string(),
                ));
            }
            Err(e) => return Err(transfer_failed(zone, format!("failed to read response: {e}"))),
        };

        if first.id() != query.id() {
            return Err(transfer_failed(
                zone,
                format!(
                    "response id {} does not match query id {}",
                    first.id(),
                    query.id()
                ),
            ));
        }
        if first.response_code() != ResponseCode::NoError {
            return Err(transfer_failed(
                zone,
                format!("server answered {:?}", first.response_code()),
            ));
        }

        Ok(Self {
            stream,
            query_id: query.id(),
            first: Some(first.answers().to_vec()),
            soa_count: 0,
            done: false,
        })
    }

    /// Returns the next envelope, or `None` when the transfer is complete.
    ///
    /// The closing SOA ends the stream; so does EOF (some servers just close
    /// the connection). A mid-stream read error yields one final `Malformed`
    /// envelope and ends the stream — records from earlier envelopes remain
    /// usable.
    pub(crate) async fn next_envelope(&mut self) -> Option<Envelope> {
        if self.done {
            return None;
        }

        if let Some(records) = self.first.take() {
            return Some(self.accept(records));
        }

        match read_frame(&mut self.stream).await {
            Ok(None) => {
                self.done = true;
                None
            }
            Ok(Some(frame)) => match Message::from_vec(&frame) {
                Ok(envelope) if envelope.id() != self.query_id => Some(Envelope::Malformed(
                    format!("envelope id {} does not match query id {}", envelope.id(), self.query_id),
                )),
                Ok(envelope) if envelope.response_code() != ResponseCode::NoError => {
                    Some(Envelope::Malformed(format!(
                        "envelope carried response code {:?}",
                        envelope.response_code()
                    )))
                }
                Ok(envelope) => Some(self.accept(envelope.answers().to_vec())),
                Err(e) => Some(Envelope::Malformed(format!("undecodable envelope: {e}"))),
            },
            Err(e) => {
                self.done = true;
                Some(Envelope::Malformed(format!("read error: {e}")))
            }
        }
    }

    /// SOA bookkeeping: the second SOA closes the transfer. Records after it
    /// in the same envelope are outside the zone bracket and dropped.
    fn accept(&mut self, records: Vec<Record>) -> Envelope {
        let mut kept = Vec::with_capacity(records.len());
        for rr in records {
            let is_soa = rr.record_type() == RecordType::SOA;
            kept.push(rr);
            if is_soa {
                self.soa_count += 1;
                if self.soa_count >= 2 {
                    self.done = true;
                    break;
                }
            }
        }
        Envelope::Records(kept)
    }
}

/// Reads one length-prefixed DNS message frame. `None` on clean EOF.
async fn read_frame(stream: &mut TcpStream) -> io::Result<Option<Vec<u8>>> {
    let mut len_bytes = [0u8; 2];
    match stream.read_exact(&mut len_bytes).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let mut frame = vec![0u8; usize::from(u16::from_be_bytes(len_bytes))];
    stream.read_exact(&mut frame).await?;
    Ok(Some(frame))
}

fn transfer_failed(zone: &Name, detail: String) -> ProviderError {
    ProviderError::TransferFailed {
        provider: PROVIDER_ID.to_string(),
        zone: zone.to_utf8(),
        detail,
    }
}
