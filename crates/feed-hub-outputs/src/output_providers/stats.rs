//! Delivery counters shared by every provider.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use feed_hub_types::PropValue;

/// Spec key for the error counter.
pub const NB_ERROR_KEY: &str = "nbError";
/// Spec key for the success counter.
pub const NB_SUCCESS_KEY: &str = "nbSuccess";

/// Success/error counters for one provider instance.
///
/// Counters only grow; each delivery attempt bumps exactly one of them.
#[derive(Debug, Default)]
pub struct DeliveryStats {
    success: AtomicU64,
    error: AtomicU64,
}

impl DeliveryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self) {
        self.success.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.error.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of a delivery and hand it back unchanged.
    pub fn record<T, E>(&self, result: Result<T, E>) -> Result<T, E> {
        match &result {
            Ok(_) => self.record_success(),
            Err(_) => self.record_error(),
        }
        result
    }

    pub fn success_count(&self) -> u64 {
        self.success.load(Ordering::Relaxed)
    }

    pub fn error_count(&self) -> u64 {
        self.error.load(Ordering::Relaxed)
    }

    /// Add both counters to a spec property map.
    pub fn with_counters(
        &self,
        mut props: BTreeMap<String, PropValue>,
    ) -> BTreeMap<String, PropValue> {
        props.insert(NB_ERROR_KEY.to_string(), self.error_count().into());
        props.insert(NB_SUCCESS_KEY.to_string(), self.success_count().into());
        props
    }
}
