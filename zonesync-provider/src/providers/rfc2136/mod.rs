//! RFC 2136 Dynamic DNS Provider
//!
//! Speaks directly to an authoritative nameserver: reads zone state with a
//! full zone transfer (AXFR, RFC 5936) and writes RRset changes with dynamic
//! update messages (RFC 2136). Works against any server that accepts
//! unauthenticated updates for the zone (BIND with `allow-update`, Active
//! Directory integrated DNS with secure update disabled, Knot, ...).

mod provider;
mod transfer;
mod transport;
mod update;

use std::env;

use hickory_proto::rr::Name;
use tokio::sync::RwLock;

/// 环境变量: nameserver 主机名（必填）
pub(crate) const HOST_VAR: &str = "RFC2136_HOST";
/// 环境变量: nameserver 端口（可选）
pub(crate) const PORT_VAR: &str = "RFC2136_PORT";
/// DNS 默认端口
pub(crate) const DEFAULT_PORT: u16 = 53;
/// Provider 标识符
pub(crate) const PROVIDER_ID: &str = "rfc2136";

/// Zone configuration derived by `init` and shared by every operation.
///
/// Immutable once written; `init` replaces it wholesale on repeat calls.
#[derive(Debug, Clone)]
pub(crate) struct ZoneConfig {
    /// Nameserver endpoint as `host:port` (IPv6 hosts bracketed).
    pub(crate) nameserver: String,
    /// Fully-qualified zone name.
    pub(crate) zone: Name,
}

/// RFC 2136 dynamic-update DNS provider.
///
/// # Construction
///
/// ```rust,no_run
/// use zonesync_provider::{DnsProvider, Rfc2136Provider};
///
/// # async fn example() -> zonesync_provider::Result<()> {
/// // Explicit settings:
/// let provider = Rfc2136Provider::new(Some("ns1.example.com".to_string()), None);
/// provider.init("example.com").await?;
///
/// // Or from the RFC2136_HOST / RFC2136_PORT environment variables:
/// let provider = Rfc2136Provider::from_env();
/// provider.init("example.com").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Rfc2136Provider {
    pub(crate) host: Option<String>,
    pub(crate) port: Option<String>,
    pub(crate) config: RwLock<Option<ZoneConfig>>,
}

impl Rfc2136Provider {
    /// Creates a provider from explicit settings.
    ///
    /// `host` is required by [`init`](crate::DnsProvider::init); `port`
    /// defaults to `53` when absent. Both are validated at `init`, not here.
    pub fn new(host: Option<String>, port: Option<String>) -> Self {
        Self {
            host,
            port,
            config: RwLock::new(None),
        }
    }

    /// Creates a provider from the `RFC2136_HOST` / `RFC2136_PORT`
    /// environment variables.
    ///
    /// Missing or empty variables are carried as `None` and surface as a
    /// configuration error at `init`.
    pub fn from_env() -> Self {
        Self::new(
            env::var(HOST_VAR).ok().filter(|v| !v.is_empty()),
            env::var(PORT_VAR).ok().filter(|v| !v.is_empty()),
        )
    }
}
