//! Output side of the feed hub.
//!
//! Providers deliver articles to external sinks; the registry builds them from
//! configuration and reports their specs.

pub mod config;
pub mod output_providers;

#[cfg(test)]
mod test_support;

pub use config::{HubConfig, OutputConfig};
pub use feed_hub_types::{Article, PropValue, ProviderSpec};
pub use output_providers::http_provider::HttpProvider;
pub use output_providers::registry::{
    build_provider, DeliveryError, OutputProvider, OutputRegistry,
};
pub use output_providers::stats::DeliveryStats;
pub use output_providers::stdout_provider::StdoutProvider;
