use serde::{Deserialize, Serialize};

// ============ Provider Types ============

/// Identifies which DNS provider implementation to use.
///
/// Each variant is gated behind its corresponding feature flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// RFC 2136 dynamic-update nameserver (BIND, Active Directory DNS, Knot, ...).
    /// Requires feature `rfc2136`.
    #[cfg(feature = "rfc2136")]
    Rfc2136,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "rfc2136")]
            Self::Rfc2136 => write!(f, "rfc2136"),
        }
    }
}

// ============ DNS Record Types ============

/// DNS record type identifier — the closed set of kinds this crate synchronizes.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, `"TXT"`).
/// Resource records of any other type encountered during a zone read are
/// silently skipped rather than reported as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Text record.
    Txt,
}

impl DnsRecordType {
    /// Returns the uppercase wire-convention name for this record type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Txt => "TXT",
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized DNS record — one RRset, independent of wire format.
///
/// `records` holds one value per individual resource record sharing the same
/// name and type (multiple A addresses, multiple TXT character strings).
/// Within one [`get_records`](crate::DnsProvider::get_records) result the
/// `(fqdn, record_type)` pair is unique; all values for that pair are merged
/// into a single `DnsRecord` preserving encounter order. The transfer protocol
/// does not guarantee that order, so callers comparing record sets must treat
/// `records` as a set.
///
/// Instances are transient per call; the nameserver is the sole source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Fully-qualified domain name, dot-terminated, case preserved as on the wire.
    pub fqdn: String,
    /// Record type.
    pub record_type: DnsRecordType,
    /// Time to live in seconds. Not meaningful on deletion (the protocol uses 0).
    pub ttl: u32,
    /// One value per resource record: address text for A/AAAA, dot-terminated
    /// target for CNAME, one character string per entry for TXT.
    pub records: Vec<String>,
}

// ============ Provider Settings ============

/// Type-safe settings container for all supported DNS providers.
///
/// Each variant holds the configuration fields consumed by that provider.
/// Pass this to [`create_provider()`](crate::create_provider) to instantiate
/// a provider.
///
/// Fields are kept as raw strings because their usual source is the process
/// environment; validation happens in [`init`](crate::DnsProvider::init).
///
/// # Serialization
///
/// Serialized as a tagged enum with `"provider"` as the tag and `"settings"`
/// as the content:
///
/// ```json
/// { "provider": "rfc2136", "settings": { "host": "ns1.example.com", "port": "53" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "settings")]
pub enum ProviderSettings {
    /// RFC 2136 provider settings. Requires feature `rfc2136`.
    #[cfg(feature = "rfc2136")]
    #[serde(rename = "rfc2136")]
    Rfc2136 {
        /// Nameserver host (name or address). Required at `init`.
        host: Option<String>,
        /// Nameserver port. Optional; defaults to `53`.
        port: Option<String>,
    },
}

impl ProviderSettings {
    /// Returns the [`ProviderType`] corresponding to this settings variant.
    #[must_use]
    pub fn provider_type(&self) -> ProviderType {
        match self {
            #[cfg(feature = "rfc2136")]
            Self::Rfc2136 { .. } => ProviderType::Rfc2136,
        }
    }
}

// ============ Provider Metadata Types ============

/// Definition of a single setting field consumed by a provider.
///
/// Used to dynamically build configuration forms or to validate an
/// environment before instantiating a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettingField {
    /// Machine-readable field key (the environment variable name, e.g., `"RFC2136_HOST"`).
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Whether the provider fails `init` without this field.
    pub required: bool,
    /// Optional help/description text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Static metadata describing a DNS provider.
///
/// Contains the provider's identity and the setting fields it consumes.
/// Obtain via [`DnsProvider::metadata()`](crate::DnsProvider::metadata) or
/// [`all_provider_metadata()`](crate::all_provider_metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider type identifier.
    pub id: ProviderType,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of the provider.
    pub description: String,
    /// Setting fields consumed by this provider.
    pub settings: Vec<ProviderSettingField>,
}
