//! Configuration loading and parsing.
//!
//! Defines the output config schema read from TOML.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use feed_hub_types::PropValue;

/// Top-level configuration loaded from TOML.
#[derive(Debug, Default, Deserialize)]
pub struct HubConfig {
    /// Output definitions, in delivery order.
    #[serde(default)]
    pub outputs: Vec<OutputConfig>,
}

/// A single output entry.
///
/// ```toml
/// [[outputs]]
/// name = "http"
/// tags = ["news"]
/// props = { url = "https://example.com/hook", timeout_ms = 5000 }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Provider kind selecting the implementation (`http`, `stdout`).
    pub name: String,
    /// Routing tags used by the dispatcher.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Provider-specific properties.
    #[serde(default)]
    pub props: BTreeMap<String, PropValue>,
}

impl OutputConfig {
    /// Create an entry with no tags or properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a property, replacing any previous value for the key.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Replace the routing tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Look up a property by key.
    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }
}

impl HubConfig {
    /// Load configuration from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            std::fs::read_to_string(path).with_context(|| format!("read config {:?}", path))?;
        Self::parse(&raw).with_context(|| format!("parse config {:?}", path))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(raw: &str) -> Result<Self> {
        let cfg = toml::from_str::<HubConfig>(raw)?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_outputs_with_mixed_props() {
        let raw = r#"
            [[outputs]]
            name = "http"
            tags = ["news", "tech"]
            props = { url = "http://localhost:8080/hook", timeout_ms = 2500 }

            [[outputs]]
            name = "stdout"
        "#;
        let cfg = HubConfig::parse(raw).unwrap();
        assert_eq!(cfg.outputs.len(), 2);

        let http = &cfg.outputs[0];
        assert_eq!(http.name, "http");
        assert_eq!(http.tags, vec!["news".to_string(), "tech".to_string()]);
        assert_eq!(
            http.prop("url").and_then(PropValue::as_str),
            Some("http://localhost:8080/hook")
        );
        assert_eq!(http.prop("timeout_ms").and_then(PropValue::as_u64), Some(2500));

        let stdout = &cfg.outputs[1];
        assert!(stdout.tags.is_empty());
        assert!(stdout.props.is_empty());
    }

    #[test]
    fn parse_accepts_empty_document() {
        let cfg = HubConfig::parse("").unwrap();
        assert!(cfg.outputs.is_empty());
    }

    #[test]
    fn parse_rejects_output_without_name() {
        let raw = r#"
            [[outputs]]
            tags = ["news"]
        "#;
        assert!(HubConfig::parse(raw).is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join("feed-hub-missing-config.toml");
        let err = HubConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("read config"));
    }

    #[test]
    fn example_config_parses() {
        let cfg = HubConfig::parse(include_str!("../config.example.toml")).unwrap();
        let names: Vec<_> = cfg.outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["http", "stdout"]);
        assert_eq!(cfg.outputs[0].prop("timeout_ms").and_then(PropValue::as_u64), Some(5000));
    }
}
