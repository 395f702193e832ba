use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Article handed to output providers once it has been fetched and normalized.
///
/// Dates are kept as RFC 3339 strings; providers forward them untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct Article {
    /// Article title.
    pub title: String,
    /// Plain-text summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// HTML content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Canonical article URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Last update date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    /// Publication date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    /// Author display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// GUID reported by the source feed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    /// Tags attached to the article by the source feed or by filters.
    pub tags: Vec<String>,
    /// Free-form metadata added by filters.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

impl Article {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Value stored in an output property bag.
///
/// Configuration entries and spec snapshots share this closed set of kinds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Unsigned(u64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl PropValue {
    /// Borrow the string payload, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Return the unsigned payload, if this is an unsigned value.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            PropValue::Unsigned(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(value) => write!(f, "{value}"),
            PropValue::Unsigned(value) => write!(f, "{value}"),
            PropValue::Float(value) => write!(f, "{value}"),
            PropValue::Text(value) => f.write_str(value),
            PropValue::List(values) => f.write_str(&values.join(",")),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<u64> for PropValue {
    fn from(value: u64) -> Self {
        PropValue::Unsigned(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<Vec<String>> for PropValue {
    fn from(values: Vec<String>) -> Self {
        PropValue::List(values)
    }
}

/// Point-in-time description of an output provider.
///
/// Built fresh on every request; holding one does not track later deliveries.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProviderSpec {
    /// Provider kind (`http`, `stdout`, ...).
    pub name: String,
    /// Human-readable description, may span several lines.
    pub desc: String,
    /// Routing tags, in configuration order.
    pub tags: Vec<String>,
    /// Resolved properties and live counters.
    pub props: BTreeMap<String, PropValue>,
}

impl ProviderSpec {
    /// Look up a property by key.
    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }
}
