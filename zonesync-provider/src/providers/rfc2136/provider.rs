//! RFC2136 DnsProvider trait 实现

use std::str::FromStr;

use async_trait::async_trait;
use hickory_proto::rr::{DNSClass, Name, RData, Record};

use crate::error::{ProviderError, Result};
use crate::providers::common::{ensure_fqdn, join_host_port};
use crate::traits::DnsProvider;
use crate::types::{
    DnsRecord, DnsRecordType, ProviderMetadata, ProviderSettingField, ProviderType,
};

use super::transfer::{Envelope, ZoneTransfer};
use super::{DEFAULT_PORT, HOST_VAR, PORT_VAR, PROVIDER_ID, Rfc2136Provider, ZoneConfig, transport, update};

impl Rfc2136Provider {
    /// 当前 zone 配置；未初始化时返回配置错误
    async fn zone_config(&self) -> Result<ZoneConfig> {
        self.config.read().await.clone().ok_or_else(|| {
            ProviderError::Configuration {
                provider: PROVIDER_ID.to_string(),
                detail: "provider is not initialized; call init() first".to_string(),
            }
        })
    }

    /// Drains a full zone transfer into raw resource records.
    ///
    /// Per-envelope errors are logged and skipped so that a malformed
    /// envelope does not discard the records already recovered.
    async fn list(&self, config: &ZoneConfig) -> Result<Vec<Record>> {
        log::debug!("[{PROVIDER_ID}] Fetching records for '{}'", config.zone);

        let mut transfer = ZoneTransfer::request(&config.nameserver, &config.zone).await?;
        let mut records = Vec::new();
        while let Some(envelope) = transfer.next_envelope().await {
            match envelope {
                Envelope::Records(rrs) => records.extend(rrs),
                Envelope::Malformed(detail) => {
                    log::error!("[{PROVIDER_ID}] AXFR envelope error: {detail}");
                }
            }
        }
        Ok(records)
    }
}

/// Folds raw transfer records into the normalized model.
///
/// Skips records outside the internet class and types outside the supported
/// set; merges values for the same `(fqdn, type)` pair into one entry,
/// preserving encounter order. The first record of a pair fixes its TTL.
/// Merge is a linear scan — zones handled here are small.
pub(crate) fn fold_records(raw: Vec<Record>) -> Vec<DnsRecord> {
    let mut records: Vec<DnsRecord> = Vec::new();

    for rr in raw {
        if rr.dns_class() != DNSClass::IN {
            continue;
        }
        let Some(data) = rr.data() else {
            continue;
        };
        let (record_type, values) = match data {
            RData::A(addr) => (DnsRecordType::A, vec![addr.0.to_string()]),
            RData::AAAA(addr) => (DnsRecordType::Aaaa, vec![addr.0.to_string()]),
            RData::CNAME(target) => (DnsRecordType::Cname, vec![target.0.to_utf8()]),
            RData::TXT(txt) => (
                DnsRecordType::Txt,
                txt.txt_data()
                    .iter()
                    .map(|segment| String::from_utf8_lossy(segment).into_owned())
                    .collect(),
            ),
            // Unhandled record type
            _ => continue,
        };

        let fqdn = rr.name().to_utf8();
        match records
            .iter_mut()
            .find(|existing| existing.fqdn == fqdn && existing.record_type == record_type)
        {
            Some(existing) => existing.records.extend(values),
            None => records.push(DnsRecord {
                fqdn,
                record_type,
                ttl: rr.ttl(),
                records: values,
            }),
        }
    }

    records
}

#[async_trait]
impl DnsProvider for Rfc2136Provider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Rfc2136,
            name: "RFC 2136 Dynamic DNS".to_string(),
            description: "Synchronizes records with an authoritative nameserver \
                          via zone transfer (AXFR) and dynamic update (RFC 2136)."
                .to_string(),
            settings: vec![
                ProviderSettingField {
                    key: HOST_VAR.to_string(),
                    label: "Nameserver host".to_string(),
                    required: true,
                    help_text: None,
                },
                ProviderSettingField {
                    key: PORT_VAR.to_string(),
                    label: "Nameserver port".to_string(),
                    required: false,
                    help_text: Some(format!("Defaults to {DEFAULT_PORT}.")),
                },
            ],
        }
    }

    async fn init(&self, root_domain: &str) -> Result<()> {
        let host = self
            .host
            .as_deref()
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .ok_or_else(|| ProviderError::Configuration {
                provider: PROVIDER_ID.to_string(),
                detail: format!("{HOST_VAR} is not set"),
            })?;

        let port = match self.port.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ProviderError::Configuration {
                provider: PROVIDER_ID.to_string(),
                detail: format!("{PORT_VAR} value '{raw}' is not a valid port"),
            })?,
            None => DEFAULT_PORT,
        };

        let zone_name = ensure_fqdn(root_domain);
        let zone = Name::from_str(&zone_name).map_err(|e| ProviderError::Configuration {
            provider: PROVIDER_ID.to_string(),
            detail: format!("invalid zone name '{root_domain}': {e}"),
        })?;

        let nameserver = join_host_port(host, port);
        log::info!(
            "[{PROVIDER_ID}] Configured with zone '{zone}' and nameserver '{nameserver}'"
        );

        *self.config.write().await = Some(ZoneConfig { nameserver, zone });
        Ok(())
    }

    async fn add_record(&self, record: &DnsRecord) -> Result<()> {
        let config = self.zone_config().await?;
        log::debug!(
            "[{PROVIDER_ID}] Adding RRset '{} {}'",
            record.fqdn,
            record.record_type
        );

        let message = update::insert_message(&config.zone, record)?;
        transport::send_message(&config.nameserver, &message).await?;
        Ok(())
    }

    async fn remove_record(&self, record: &DnsRecord) -> Result<()> {
        let config = self.zone_config().await?;
        log::debug!(
            "[{PROVIDER_ID}] Removing RRset '{} {}'",
            record.fqdn,
            record.record_type
        );

        let message = update::delete_rrset_message(&config.zone, record)?;
        transport::send_message(&config.nameserver, &message).await?;
        Ok(())
    }

    async fn get_records(&self) -> Result<Vec<DnsRecord>> {
        let config = self.zone_config().await?;
        let raw = self.list(&config).await?;
        Ok(fold_records(raw))
    }
}
