use serde::{Deserialize, Serialize};

/// Unified error type for all DNS provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Error Kinds
///
/// - [`Configuration`](Self::Configuration) — a required setting is missing or invalid;
///   surfaced at `init` (or when an operation runs before `init`). Nothing partial happens.
/// - [`InvalidRecord`](Self::InvalidRecord) — a record value cannot be rendered into a
///   valid resource record; the enclosing write aborts before any network I/O.
/// - [`TransferFailed`](Self::TransferFailed) — the zone-transfer session could not be
///   established; reads abort with no partial result.
/// - [`NetworkError`](Self::NetworkError) — a transport-level send/receive failure.
/// - [`ServerRejected`](Self::ServerRejected) — the nameserver answered with a non-success
///   response code; the symbolic code name is included.
/// - [`ParseError`](Self::ParseError) — a message failed to encode or a response failed
///   to decode.
///
/// No variant is retried by this crate; retry policy belongs to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A required configuration value is missing or invalid.
    Configuration {
        /// Provider that produced the error.
        provider: String,
        /// What is missing or invalid.
        detail: String,
    },

    /// A record value could not be turned into a valid resource record.
    ///
    /// Raised before any network I/O, so the write is never partially applied.
    InvalidRecord {
        /// Provider that produced the error.
        provider: String,
        /// Fully-qualified name of the offending record.
        fqdn: String,
        /// Description of what's wrong with the value.
        detail: String,
    },

    /// The zone-transfer session could not be established.
    ///
    /// Covers connection failures and transfers the server refuses outright.
    /// Per-envelope errors after establishment are logged and skipped instead.
    TransferFailed {
        /// Provider that produced the error.
        provider: String,
        /// Zone the transfer was requested for.
        zone: String,
        /// Error details.
        detail: String,
    },

    /// A network-level error occurred (send/receive failure, unresolvable endpoint, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The nameserver answered with a non-success response code.
    ServerRejected {
        /// Provider that produced the error.
        provider: String,
        /// Symbolic response code name (e.g., `"Refused"`, `"NotAuth"`).
        rcode: String,
    },

    /// A DNS message failed to encode, or a response failed to decode.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the encode/decode failure.
        detail: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（配置缺失、非法输入、服务器明确拒绝等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::InvalidRecord { .. } | Self::ServerRejected { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration { provider, detail } => {
                write!(f, "[{provider}] Configuration error: {detail}")
            }
            Self::InvalidRecord {
                provider,
                fqdn,
                detail,
            } => {
                write!(f, "[{provider}] Invalid record '{fqdn}': {detail}")
            }
            Self::TransferFailed {
                provider,
                zone,
                detail,
            } => {
                write!(f, "[{provider}] Zone transfer for '{zone}' failed: {detail}")
            }
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::ServerRejected { provider, rcode } => {
                write!(f, "[{provider}] Bad return code: {rcode}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
