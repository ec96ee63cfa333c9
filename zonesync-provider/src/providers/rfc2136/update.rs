//! RFC 2136 update message construction.
//!
//! An update message reuses the query wire layout: the zone being updated
//! travels in the query section (qtype SOA), and the changes travel in the
//! authority section. Two change shapes are produced here: RRset insertion
//! (class IN, caller TTL, one record per value) and whole-RRset deletion
//! (class ANY, TTL 0, empty rdata — keyed by name and type only).

use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata;
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};

use crate::error::{ProviderError, Result};
use crate::types::{DnsRecord, DnsRecordType};

use super::PROVIDER_ID;

/// Builds an update message inserting one resource record per value in
/// `record.records`, all sharing the record's name, type and TTL.
///
/// Fails with [`ProviderError::InvalidRecord`] before any record is built if
/// the name or any single value does not parse — no partial insert.
pub(crate) fn insert_message(zone: &Name, record: &DnsRecord) -> Result<Message> {
    let name = parse_name(&record.fqdn)?;

    let mut rrs = Vec::with_capacity(record.records.len());
    for value in &record.records {
        let rdata = build_rdata(&record.record_type, &record.fqdn, value)?;
        let mut rr = Record::from_rdata(name.clone(), record.ttl, rdata);
        rr.set_dns_class(DNSClass::IN);
        rrs.push(rr);
    }

    let mut message = update_message(zone);
    for rr in rrs {
        message.add_name_server(rr);
    }
    Ok(message)
}

/// Builds an update message deleting the entire RRset for the record's name
/// and type.
///
/// The update protocol keys this operation on name+type alone: class ANY,
/// TTL 0, no rdata. The record's TTL and values are ignored.
pub(crate) fn delete_rrset_message(zone: &Name, record: &DnsRecord) -> Result<Message> {
    let name = parse_name(&record.fqdn)?;

    // from_rdata 需要一个占位 rdata 来确定记录类型，随后清空
    let mut rr = Record::from_rdata(name, 0, placeholder_rdata(&record.record_type));
    rr.set_dns_class(DNSClass::ANY);
    rr.set_data(None);

    let mut message = update_message(zone);
    message.add_name_server(rr);
    Ok(message)
}

/// Empty update message scoped to `zone`.
fn update_message(zone: &Name) -> Message {
    let mut message = Message::new();
    message
        .set_id(rand::random())
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Update)
        .set_recursion_desired(false);
    message.add_query(Query::query(zone.clone(), RecordType::SOA));
    message
}

/// Parses a single record value into typed rdata for its record kind.
fn build_rdata(record_type: &DnsRecordType, fqdn: &str, value: &str) -> Result<RData> {
    match record_type {
        DnsRecordType::A => value
            .parse::<Ipv4Addr>()
            .map(|addr| RData::A(addr.into()))
            .map_err(|_| invalid_record(fqdn, format!("invalid IPv4 address '{value}'"))),
        DnsRecordType::Aaaa => value
            .parse::<Ipv6Addr>()
            .map(|addr| RData::AAAA(addr.into()))
            .map_err(|_| invalid_record(fqdn, format!("invalid IPv6 address '{value}'"))),
        DnsRecordType::Cname => Name::from_str(value)
            .map(|target| RData::CNAME(rdata::CNAME(target)))
            .map_err(|e| invalid_record(fqdn, format!("invalid CNAME target '{value}': {e}"))),
        DnsRecordType::Txt => Ok(RData::TXT(rdata::TXT::new(vec![value.to_string()]))),
    }
}

/// Sentinel rdata for a delete-RRset record; discarded by `set_data(None)`
/// after it has fixed the record type.
fn placeholder_rdata(record_type: &DnsRecordType) -> RData {
    match record_type {
        DnsRecordType::A => RData::A(Ipv4Addr::UNSPECIFIED.into()),
        DnsRecordType::Aaaa => RData::AAAA(Ipv6Addr::UNSPECIFIED.into()),
        DnsRecordType::Cname => RData::CNAME(rdata::CNAME(Name::root())),
        DnsRecordType::Txt => RData::TXT(rdata::TXT::new(vec![String::new()])),
    }
}

fn parse_name(fqdn: &str) -> Result<Name> {
    Name::from_str(fqdn)
        .map_err(|e| invalid_record(fqdn, format!("invalid domain name '{fqdn}': {e}")))
}

fn invalid_record(fqdn: &str, detail: String) -> ProviderError {
    ProviderError::InvalidRecord {
        provider: PROVIDER_ID.to_string(),
        fqdn: fqdn.to_string(),
        detail,
    }
}
