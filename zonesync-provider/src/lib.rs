//! # zonesync-provider
//!
//! A DNS provider library for synchronizing resource records with an
//! authoritative nameserver, speaking the DNS protocol directly: reads use a
//! full zone transfer (AXFR), writes use dynamic update messages (RFC 2136).
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Read Path | Write Path |
//! |----------|-------------|-----------|------------|
//! | RFC 2136 nameserver (BIND, AD DNS, Knot, ...) | `rfc2136` | AXFR over TCP | dynamic update over UDP |
//!
//! ## Feature Flags
//!
//! - **`rfc2136`** *(default)* — Enable the RFC 2136 provider.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zonesync_provider::{DnsProvider, DnsRecord, DnsRecordType, ProviderSettings, create_provider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a provider from settings (or use Rfc2136Provider::from_env())
//!     let provider = create_provider(ProviderSettings::Rfc2136 {
//!         host: Some("ns1.example.com".to_string()),
//!         port: None, // defaults to 53
//!     })?;
//!
//!     // 2. Derive the zone configuration
//!     provider.init("example.com").await?;
//!
//!     // 3. Read the zone's current state
//!     for record in provider.get_records().await? {
//!         println!("{} {} {:?}", record.fqdn, record.record_type, record.records);
//!     }
//!
//!     // 4. Insert an RRset
//!     provider
//!         .add_record(&DnsRecord {
//!             fqdn: "www.example.com.".to_string(),
//!             record_type: DnsRecordType::A,
//!             ttl: 300,
//!             records: vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()],
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! The error enum provides structured variants for the failure modes of the
//! protocol path:
//!
//! - [`ProviderError::Configuration`] — missing/invalid setting, surfaced at `init`
//! - [`ProviderError::InvalidRecord`] — a record value does not parse; nothing was sent
//! - [`ProviderError::TransferFailed`] — the zone-transfer session could not be established
//! - [`ProviderError::ServerRejected`] — the server answered with a non-success code
//!
//! No operation retries; retry policy belongs to the calling orchestrator.

mod error;
mod factory;
mod providers;
mod traits;
mod types;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions and the registry
pub use factory::{ProviderRegistry, all_provider_metadata, create_provider};

// Re-export core trait only (internal helpers are not exported)
pub use traits::DnsProvider;

// Re-export types
pub use types::{
    DnsRecord, DnsRecordType, ProviderMetadata, ProviderSettingField, ProviderSettings,
    ProviderType,
};

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "rfc2136")]
pub use providers::Rfc2136Provider;
