//! Provider factory functions and the provider registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::traits::DnsProvider;
use crate::types::{ProviderMetadata, ProviderSettings};

#[cfg(feature = "rfc2136")]
use crate::providers::Rfc2136Provider;

/// Creates a [`DnsProvider`] instance from the given settings.
///
/// The concrete provider type is determined by the [`ProviderSettings`]
/// variant. The returned provider is wrapped in `Arc<dyn DnsProvider>` for
/// easy sharing across async tasks. Settings are validated later, by
/// [`init`](DnsProvider::init), not here.
///
/// # Examples
///
/// ```rust,no_run
/// use zonesync_provider::{ProviderSettings, create_provider};
///
/// let provider = create_provider(ProviderSettings::Rfc2136 {
///     host: Some("ns1.example.com".to_string()),
///     port: None,
/// }).unwrap();
/// ```
pub fn create_provider(settings: ProviderSettings) -> Result<Arc<dyn DnsProvider>> {
    match settings {
        #[cfg(feature = "rfc2136")]
        ProviderSettings::Rfc2136 { host, port } => Ok(Arc::new(Rfc2136Provider::new(host, port))),
    }
}

/// Returns metadata for all providers enabled via feature flags.
///
/// Useful for enumerating available providers and the setting fields they
/// consume before instantiating any of them.
pub fn all_provider_metadata() -> Vec<ProviderMetadata> {
    vec![
        #[cfg(feature = "rfc2136")]
        Rfc2136Provider::metadata(),
    ]
}

/// An explicit provider registry, keyed by provider id.
///
/// Populated at process start and passed by reference into the orchestrator —
/// there is no implicit global registration side effect. A provider registered
/// under an id already present replaces the previous entry.
pub struct ProviderRegistry {
    providers: HashMap<&'static str, Arc<dyn DnsProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Creates a registry holding every feature-enabled provider, each
    /// configured from its environment variables.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        #[cfg(feature = "rfc2136")]
        registry.register(Arc::new(Rfc2136Provider::from_env()));
        registry
    }

    /// Registers a provider under its [`id`](DnsProvider::id).
    pub fn register(&mut self, provider: Arc<dyn DnsProvider>) {
        self.providers.insert(provider.id(), provider);
    }

    /// Looks up a provider by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn DnsProvider>> {
        self.providers.get(id).cloned()
    }

    /// Lists the registered provider ids.
    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        self.providers.keys().copied().collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
