//! Output provider implementations and registry wiring.
//!
//! Includes the HTTP and stdout providers plus the shared registry.

pub mod format;
pub mod http_provider;
pub mod registry;
pub mod stats;
pub mod stdout_provider;
