//! 共享测试工具：进程内 mock nameserver
//!
//! Two tiny wire-level servers back the integration tests: a UDP task that
//! captures dynamic-update messages and answers with a scripted response
//! code, and a TCP task that serves a scripted AXFR envelope stream.

#![allow(dead_code)]

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata;
use hickory_proto::rr::{DNSClass, Name, RData, Record};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::mpsc;

use zonesync_provider::Rfc2136Provider;

// ============ Record 构造 ============

pub fn name(s: &str) -> Name {
    Name::from_str(s).expect("test name should parse")
}

pub fn a_rr(fqdn: &str, ttl: u32, addr: &str) -> Record {
    let ip = Ipv4Addr::from_str(addr).expect("test IPv4 should parse");
    let mut rr = Record::from_rdata(name(fqdn), ttl, RData::A(ip.into()));
    rr.set_dns_class(DNSClass::IN);
    rr
}

pub fn aaaa_rr(fqdn: &str, ttl: u32, addr: &str) -> Record {
    let ip = Ipv6Addr::from_str(addr).expect("test IPv6 should parse");
    let mut rr = Record::from_rdata(name(fqdn), ttl, RData::AAAA(ip.into()));
    rr.set_dns_class(DNSClass::IN);
    rr
}

pub fn cname_rr(fqdn: &str, ttl: u32, target: &str) -> Record {
    let mut rr = Record::from_rdata(name(fqdn), ttl, RData::CNAME(rdata::CNAME(name(target))));
    rr.set_dns_class(DNSClass::IN);
    rr
}

pub fn txt_rr(fqdn: &str, ttl: u32, segments: &[&str]) -> Record {
    let strings: Vec<String> = segments.iter().map(|s| (*s).to_string()).collect();
    let mut rr = Record::from_rdata(name(fqdn), ttl, RData::TXT(rdata::TXT::new(strings)));
    rr.set_dns_class(DNSClass::IN);
    rr
}

pub fn ns_rr(fqdn: &str, ttl: u32, nameserver: &str) -> Record {
    let mut rr = Record::from_rdata(name(fqdn), ttl, RData::NS(rdata::NS(name(nameserver))));
    rr.set_dns_class(DNSClass::IN);
    rr
}

pub fn soa_rr(zone: &str) -> Record {
    let mut rr = Record::from_rdata(
        name(zone),
        3600,
        RData::SOA(rdata::SOA::new(
            name(&format!("ns1.{zone}")),
            name(&format!("hostmaster.{zone}")),
            2024_07_01,
            7200,
            900,
            1_209_600,
            300,
        )),
    );
    rr.set_dns_class(DNSClass::IN);
    rr
}

// ============ Mock update server (UDP) ============

pub struct UpdateServer {
    pub addr: SocketAddr,
    /// Every update message received, in arrival order.
    pub requests: mpsc::UnboundedReceiver<Message>,
}

/// Spawns a UDP nameserver that captures each incoming message and answers it
/// with the next response code in `rcodes` (the last one repeats).
pub async fn spawn_update_server(rcodes: Vec<ResponseCode>) -> UpdateServer {
    let socket = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("mock update server should bind");
    let addr = socket.local_addr().expect("mock server should have an address");
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut buf = vec![0u8; 4096];
        let mut served = 0usize;
        loop {
            let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                return;
            };
            let Ok(request) = Message::from_vec(&buf[..len]) else {
                continue;
            };

            let rcode = rcodes
                .get(served)
                .or_else(|| rcodes.last())
                .copied()
                .unwrap_or(ResponseCode::NoError);
            served += 1;

            let mut response = Message::new();
            response
                .set_id(request.id())
                .set_message_type(MessageType::Response)
                .set_op_code(OpCode::Update)
                .set_response_code(rcode);

            if tx.send(request).is_err() {
                return;
            }
            let Ok(wire) = response.to_vec() else {
                continue;
            };
            let _ = socket.send_to(&wire, peer).await;
        }
    });

    UpdateServer { addr, requests: rx }
}

// ============ Mock zone transfer server (TCP) ============

#[derive(Clone)]
pub enum AxfrEnvelope {
    /// A well-formed envelope carrying these answer records.
    Records(Vec<Record>),
    /// A length-prefixed frame that is not a DNS message.
    Garbage,
}

/// Spawns a TCP nameserver that answers every AXFR query with the scripted
/// envelope stream, then closes the connection. The first envelope carries
/// `rcode`; later envelopes are `NoError`.
pub async fn spawn_axfr_server(rcode: ResponseCode, envelopes: Vec<AxfrEnvelope>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("mock transfer server should bind");
    let addr = listener.local_addr().expect("mock server should have an address");

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };

            let mut len_bytes = [0u8; 2];
            if stream.read_exact(&mut len_bytes).await.is_err() {
                continue;
            }
            let mut frame = vec![0u8; usize::from(u16::from_be_bytes(len_bytes))];
            if stream.read_exact(&mut frame).await.is_err() {
                continue;
            }
            let Ok(query) = Message::from_vec(&frame) else {
                continue;
            };

            let mut first = true;
            for envelope in &envelopes {
                match envelope {
                    AxfrEnvelope::Records(rrs) => {
                        let mut response = Message::new();
                        response
                            .set_id(query.id())
                            .set_message_type(MessageType::Response)
                            .set_op_code(OpCode::Query)
                            .set_response_code(if first { rcode } else { ResponseCode::NoError });
                        for rr in rrs {
                            response.add_answer(rr.clone());
                        }
                        if write_frame(&mut stream, &response).await.is_err() {
                            break;
                        }
                    }
                    AxfrEnvelope::Garbage => {
                        let junk = [0xde, 0xad, 0xbe, 0xef, 0x00, 0x01];
                        let frame_len = junk.len() as u16;
                        if stream.write_all(&frame_len.to_be_bytes()).await.is_err() {
                            break;
                        }
                        if stream.write_all(&junk).await.is_err() {
                            break;
                        }
                    }
                }
                first = false;
            }
            // connection drop = EOF for the client
        }
    });

    addr
}

async fn write_frame(stream: &mut tokio::net::TcpStream, message: &Message) -> std::io::Result<()> {
    let wire = message
        .to_vec()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let frame_len = wire.len() as u16;
    stream.write_all(&frame_len.to_be_bytes()).await?;
    stream.write_all(&wire).await
}

/// One well-formed transfer: SOA, the given records, closing SOA.
pub fn single_envelope_zone(zone: &str, records: Vec<Record>) -> Vec<AxfrEnvelope> {
    let soa = soa_rr(zone);
    let mut rrs = vec![soa.clone()];
    rrs.extend(records);
    rrs.push(soa);
    vec![AxfrEnvelope::Records(rrs)]
}

// ============ Provider 构造 ============

/// A provider pointed at a mock server, initialized for `example.com`.
pub async fn provider_for(addr: SocketAddr) -> Rfc2136Provider {
    use zonesync_provider::DnsProvider;

    let provider = Rfc2136Provider::new(Some(addr.ip().to_string()), Some(addr.port().to_string()));
    provider
        .init("example.com")
        .await
        .expect("init against mock server should succeed");
    provider
}

/// A TCP port that nothing is listening on.
pub async fn unused_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("probe listener should bind");
    let addr = listener.local_addr().expect("probe listener should have an address");
    drop(listener);
    addr
}
