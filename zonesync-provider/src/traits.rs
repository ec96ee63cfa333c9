use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DnsRecord, ProviderMetadata};

/// DNS 提供商 Trait
///
/// The contract a DNS-sync orchestrator programs against. One instance is
/// configured for a single zone on a single authoritative nameserver via
/// [`init`](Self::init); every other operation performs at most one network
/// round trip against that server and retains nothing between calls.
///
/// No operation applies its own timeout — callers needing bounded latency
/// wrap the returned futures with their own deadline.
#[async_trait]
pub trait DnsProvider: Send + Sync + std::fmt::Debug {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 获取 Provider 元数据（类型级别）
    ///
    /// 返回该 Provider 的元数据，包括名称、描述、配置字段等。
    /// 此方法不需要实例，可以在创建 Provider 之前调用。
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Derive and store the zone configuration for `root_domain`.
    ///
    /// Validates the provider's settings (fails fast with a
    /// [`Configuration`](crate::ProviderError::Configuration) error when the
    /// required host is absent), derives the nameserver endpoint and the
    /// fully-qualified zone name, and stores them for all later operations.
    ///
    /// Idempotent: calling again simply recomputes the configuration.
    async fn init(&self, root_domain: &str) -> Result<()>;

    /// Liveness probe: succeeds iff zone data is currently retrievable.
    ///
    /// Defined as "can a read succeed" — the default implementation performs
    /// a full [`get_records`](Self::get_records) and discards the result,
    /// with identical failure conditions.
    async fn health_check(&self) -> Result<()> {
        self.get_records().await.map(|_| ())
    }

    /// Insert the record's values into the RRset for `(fqdn, record_type)`.
    ///
    /// Adds to the existing set rather than replacing it. Aborts before any
    /// network I/O if any single value fails to parse — no partial insert.
    async fn add_record(&self, record: &DnsRecord) -> Result<()>;

    /// Delete the entire RRset for `(fqdn, record_type)`.
    ///
    /// The deletion is keyed by name and type only; the record's `ttl` and
    /// `records` values are ignored.
    async fn remove_record(&self, record: &DnsRecord) -> Result<()>;

    /// Replace the RRset for `(fqdn, record_type)` with the record's values.
    ///
    /// Defined as [`remove_record`](Self::remove_record) followed by
    /// [`add_record`](Self::add_record). **Not atomic**: the update protocol
    /// scopes transactions to a single message, so if the removal is accepted
    /// and the add then fails, the RRset is left empty. Callers must treat
    /// this as a failure window and may need to re-drive the update.
    async fn update_record(&self, record: &DnsRecord) -> Result<()> {
        self.remove_record(record).await?;
        self.add_record(record).await
    }

    /// Read the zone's current state, normalized to [`DnsRecord`] entries.
    ///
    /// Performs a full zone transfer and merges same-name, same-type resource
    /// records into one entry each. Records outside the supported type set or
    /// the internet class are skipped silently.
    async fn get_records(&self) -> Result<Vec<DnsRecord>>;
}
