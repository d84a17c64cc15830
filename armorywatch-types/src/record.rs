//! Per-entity metric records.

use std::collections::BTreeMap;

/// A single scalar metric value.
///
/// Metrics are either integers (levels, ratings, counts, timestamps) or
/// short text values (guild name, realm status). Anything richer belongs
/// in a dedicated field on the consumer side, not in a record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MetricValue {
    /// An integer metric (level, rating, gold, boss kills, ...).
    Integer(i64),
    /// A text metric (guild name, realm status, class name, ...).
    Text(String),
}

impl MetricValue {
    /// The integer value, or `None` for text metrics.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            MetricValue::Integer(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }

    /// The text value, or `None` for integer metrics.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetricValue::Integer(_) => None,
            MetricValue::Text(s) => Some(s),
        }
    }
}

impl From<i64> for MetricValue {
    fn from(n: i64) -> Self {
        MetricValue::Integer(n)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(s: String) -> Self {
        MetricValue::Text(s)
    }
}

/// A flat mapping from metric name to scalar value for one tracked entity
/// (a character or a realm).
///
/// Records are rebuilt from scratch every poll cycle - there is no
/// incremental update and no history. Extractors write their complete key
/// set into the record unconditionally, so a consumer reading a key for an
/// enabled feature category always finds it, with a zero/empty default when
/// the underlying fetch failed.
///
/// # Example
///
/// ```rust
/// use armorywatch_types::MetricRecord;
///
/// let mut record = MetricRecord::new();
/// record.set("pvp_2v2_rating", 1800);
/// record.set("guild_name", "Brewmasters");
///
/// assert_eq!(record.integer("pvp_2v2_rating"), 1800);
/// assert_eq!(record.text("guild_name"), "Brewmasters");
/// assert_eq!(record.integer("missing_key"), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MetricRecord {
    /// The metric values, keyed by metric name.
    pub values: BTreeMap<String, MetricValue>,
}

impl MetricRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a metric value, overwriting any previous value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get a raw metric value.
    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.values.get(key)
    }

    /// Get an integer metric, defaulting to 0 when absent or text-valued.
    pub fn integer(&self, key: &str) -> i64 {
        self.values.get(key).and_then(MetricValue::as_integer).unwrap_or(0)
    }

    /// Get a text metric, defaulting to `""` when absent or integer-valued.
    pub fn text(&self, key: &str) -> &str {
        self.values.get(key).and_then(MetricValue::as_text).unwrap_or("")
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Merge another record into this one. Keys from `other` win on conflict.
    pub fn merge(&mut self, other: MetricRecord) {
        self.values.extend(other.values);
    }

    /// Number of metrics in the record.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the record has no metrics.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all metrics.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetricValue)> {
        self.values.iter()
    }
}
