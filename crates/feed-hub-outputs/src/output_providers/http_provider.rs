//! HTTP output provider.
//!
//! POSTs each article as a JSON document to a configured endpoint.

use std::collections::BTreeMap;
use std::time::Duration;

use feed_hub_types::{Article, PropValue, ProviderSpec};

use crate::config::OutputConfig;
use crate::output_providers::format::with_json_format;
use crate::output_providers::registry::{DeliveryError, OutputProvider};
use crate::output_providers::stats::DeliveryStats;

pub const NAME: &str = "http";

const CONTENT_TYPE: &str = "application/json; charset=utf-8";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_USER_AGENT: &str = concat!("feed-hub/", env!("CARGO_PKG_VERSION"));

pub struct HttpProvider {
    desc: String,
    tags: Vec<String>,
    uri: String,
    timeout_ms: u64,
    agent: ureq::Agent,
    stats: DeliveryStats,
}

impl HttpProvider {
    /// Build a provider from a config entry.
    ///
    /// Returns `None` when the entry has no usable `url` property.
    /// Optional props: `timeout_ms` (0 disables the timeout) and `user_agent`.
    pub fn from_config(cfg: &OutputConfig) -> Option<Self> {
        let uri = cfg.prop("url")?.to_string();
        if uri.trim().is_empty() {
            return None;
        }
        let timeout_ms = cfg
            .prop("timeout_ms")
            .and_then(PropValue::as_u64)
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        let user_agent = cfg
            .prop("user_agent")
            .and_then(PropValue::as_str)
            .unwrap_or(DEFAULT_USER_AGENT);
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global((timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)))
            .user_agent(user_agent)
            .build();

        Some(Self {
            desc: with_json_format(
                "New articles are sent as JSON document to an HTTP endpoint (POST).",
            ),
            tags: cfg.tags.clone(),
            uri,
            timeout_ms,
            agent: ureq::Agent::new_with_config(config),
            stats: DeliveryStats::new(),
        })
    }

    /// Target endpoint.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    fn post(&self, article: &Article) -> Result<(), DeliveryError> {
        let body = serde_json::to_vec(article).map_err(DeliveryError::Encode)?;
        let resp = self
            .agent
            .post(&self.uri)
            .header("Content-Type", CONTENT_TYPE)
            .send(&body[..])
            .map_err(DeliveryError::Transport)?;
        let code = resp.status().as_u16();
        if code >= 300 {
            return Err(DeliveryError::Status(code));
        }
        Ok(())
    }
}

impl OutputProvider for HttpProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn send(&self, article: &Article) -> Result<(), DeliveryError> {
        self.stats.record(self.post(article))
    }

    fn spec(&self) -> ProviderSpec {
        let mut props = BTreeMap::new();
        props.insert("uri".to_string(), PropValue::from(self.uri.as_str()));
        props.insert("timeout_ms".to_string(), PropValue::from(self.timeout_ms));
        ProviderSpec {
            name: NAME.to_string(),
            desc: self.desc.clone(),
            tags: self.tags.clone(),
            props: self.stats.with_counters(props),
        }
    }
}
