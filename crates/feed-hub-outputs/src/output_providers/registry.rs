//! Output provider contract, factory and registry.
//!
//! Turns configuration entries into provider instances and exposes their specs.

use std::fmt;
use std::sync::Arc;

use feed_hub_types::{Article, ProviderSpec};

use crate::config::OutputConfig;
use crate::output_providers::http_provider::{self, HttpProvider};
use crate::output_providers::stdout_provider::{self, StdoutProvider};

/// Provider kinds the factory knows how to build.
pub const KNOWN_PROVIDERS: &[&str] = &[http_provider::NAME, stdout_provider::NAME];

/// Why a single delivery attempt failed.
#[derive(Debug)]
pub enum DeliveryError {
    /// The article could not be encoded as JSON.
    Encode(serde_json::Error),
    /// No response was received (connect, DNS, timeout, invalid url).
    Transport(ureq::Error),
    /// The endpoint answered with a status code outside 2xx.
    Status(u16),
    /// Writing to a local sink failed.
    Io(std::io::Error),
}

impl DeliveryError {
    /// Status code carried by a protocol failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::Encode(err) => write!(f, "encode article: {err}"),
            DeliveryError::Transport(err) => write!(f, "transport error: {err}"),
            DeliveryError::Status(code) => write!(f, "bad status code: {code}"),
            DeliveryError::Io(err) => write!(f, "write article: {err}"),
        }
    }
}

impl std::error::Error for DeliveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeliveryError::Encode(err) => Some(err),
            DeliveryError::Transport(err) => Some(err),
            DeliveryError::Status(_) => None,
            DeliveryError::Io(err) => Some(err),
        }
    }
}

pub trait OutputProvider: Send + Sync {
    /// Provider kind, as written in configuration.
    fn name(&self) -> &str;
    /// Routing tags attached to this instance.
    fn tags(&self) -> &[String];
    /// Deliver one article. Every call moves exactly one counter.
    fn send(&self, article: &Article) -> Result<(), DeliveryError>;
    /// Snapshot identity, configuration and counters.
    fn spec(&self) -> ProviderSpec;
}

/// Build the provider described by a config entry.
///
/// Returns `None` for unknown kinds and for entries missing a required property.
pub fn build_provider(cfg: &OutputConfig) -> Option<Box<dyn OutputProvider>> {
    match cfg.name.as_str() {
        http_provider::NAME => {
            HttpProvider::from_config(cfg).map(|p| Box::new(p) as Box<dyn OutputProvider>)
        }
        stdout_provider::NAME => {
            StdoutProvider::from_config(cfg).map(|p| Box::new(p) as Box<dyn OutputProvider>)
        }
        _ => None,
    }
}

pub struct OutputRegistry {
    providers: Vec<Arc<dyn OutputProvider>>,
}

impl OutputRegistry {
    /// Create a registry from an explicit provider list.
    pub fn new(providers: Vec<Arc<dyn OutputProvider>>) -> Self {
        Self { providers }
    }

    /// Build every applicable entry, keeping configuration order.
    pub fn from_configs(configs: &[OutputConfig]) -> Self {
        let mut providers: Vec<Arc<dyn OutputProvider>> = Vec::with_capacity(configs.len());
        for (index, cfg) in configs.iter().enumerate() {
            match build_provider(cfg) {
                Some(provider) => {
                    tracing::info!(
                        index,
                        name = %cfg.name,
                        tags = ?cfg.tags,
                        "output provider ready"
                    );
                    providers.push(Arc::from(provider));
                }
                None if KNOWN_PROVIDERS.contains(&cfg.name.as_str()) => {
                    tracing::warn!(
                        index,
                        name = %cfg.name,
                        "output config is missing required properties; skipping"
                    );
                }
                None => {
                    tracing::warn!(index, name = %cfg.name, "unknown output provider; skipping");
                }
            }
        }
        Self::new(providers)
    }

    /// Shared handles for the dispatcher.
    pub fn providers(&self) -> &[Arc<dyn OutputProvider>] {
        &self.providers
    }

    /// Specs for every provider, in registry order.
    pub fn specs(&self) -> Vec<ProviderSpec> {
        self.providers.iter().map(|p| p.spec()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
