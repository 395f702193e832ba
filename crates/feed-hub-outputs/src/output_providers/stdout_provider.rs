//! Standard output provider.
//!
//! Writes each article as one line of JSON, for piping into other tools.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Mutex;

use feed_hub_types::{Article, ProviderSpec};

use crate::config::OutputConfig;
use crate::output_providers::format::with_json_format;
use crate::output_providers::registry::{DeliveryError, OutputProvider};
use crate::output_providers::stats::DeliveryStats;

pub const NAME: &str = "stdout";

pub struct StdoutProvider {
    desc: String,
    tags: Vec<String>,
    writer: Mutex<Box<dyn Write + Send>>,
    stats: DeliveryStats,
}

impl StdoutProvider {
    /// Build a provider writing to the process stdout. Has no required props.
    pub fn from_config(cfg: &OutputConfig) -> Option<Self> {
        Some(Self::with_writer(cfg, Box::new(std::io::stdout())))
    }

    /// Build a provider writing to an arbitrary sink.
    pub fn with_writer(cfg: &OutputConfig, writer: Box<dyn Write + Send>) -> Self {
        Self {
            desc: with_json_format(
                "New articles are written as JSON documents, one per line, to the standard output of the process.",
            ),
            tags: cfg.tags.clone(),
            writer: Mutex::new(writer),
            stats: DeliveryStats::new(),
        }
    }

    fn write_line(&self, article: &Article) -> Result<(), DeliveryError> {
        let mut line = serde_json::to_vec(article).map_err(DeliveryError::Encode)?;
        line.push(b'\n');
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writer.write_all(&line).map_err(DeliveryError::Io)?;
        writer.flush().map_err(DeliveryError::Io)
    }
}

impl OutputProvider for StdoutProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn send(&self, article: &Article) -> Result<(), DeliveryError> {
        self.stats.record(self.write_line(article))
    }

    fn spec(&self) -> ProviderSpec {
        ProviderSpec {
            name: NAME.to_string(),
            desc: self.desc.clone(),
            tags: self.tags.clone(),
            props: self.stats.with_counters(BTreeMap::new()),
        }
    }
}
