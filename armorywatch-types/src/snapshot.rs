//! Snapshot - the complete output of one poll cycle.

use std::collections::BTreeMap;

use crate::MetricRecord;

/// A point-in-time snapshot of all tracked entities.
///
/// This is the unit handed to consumers: one metric record per tracked
/// character plus one per tracked realm, a success flag for the cycle that
/// produced it, and a timestamp. Snapshots are wholly replaced each cycle -
/// there is no merging with the previous snapshot.
///
/// When a cycle fails, the coordinator republishes the previous snapshot's
/// records with `success` set to `false`, so consumers keep showing stale
/// data rather than gaps.
///
/// # Example
///
/// ```rust
/// use armorywatch_types::{MetricRecord, Snapshot};
///
/// let mut thrall = MetricRecord::new();
/// thrall.set("character_level", 80);
///
/// let snapshot = Snapshot::builder()
///     .character("durotan-thrall", thrall)
///     .realm("durotan", MetricRecord::new())
///     .build();
///
/// assert_eq!(snapshot.character_count(), 1);
/// assert_eq!(snapshot.realm_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Unix timestamp in milliseconds when this snapshot was assembled.
    pub timestamp_ms: u64,

    /// Whether the cycle that produced this snapshot completed.
    pub success: bool,

    /// Character records, keyed by `"{realm}-{name}"`.
    pub characters: BTreeMap<String, MetricRecord>,

    /// Realm records, keyed by realm name.
    pub realms: BTreeMap<String, MetricRecord>,
}

impl Snapshot {
    /// Create an empty successful snapshot with the current timestamp.
    pub fn new() -> Self {
        Self {
            timestamp_ms: current_timestamp_ms(),
            success: true,
            characters: BTreeMap::new(),
            realms: BTreeMap::new(),
        }
    }

    /// Create a builder for constructing snapshots.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// Get the record for a character key.
    pub fn character(&self, key: &str) -> Option<&MetricRecord> {
        self.characters.get(key)
    }

    /// Get the record for a realm.
    pub fn realm(&self, realm: &str) -> Option<&MetricRecord> {
        self.realms.get(realm)
    }

    /// Number of character records.
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Number of realm records.
    pub fn realm_count(&self) -> usize {
        self.realms.len()
    }

    /// Check if the snapshot holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.realms.is_empty()
    }

    /// Mark this snapshot as the output of a failed cycle, refreshing the
    /// timestamp so consumers can see when the failure was observed.
    pub fn into_failed(mut self) -> Self {
        self.success = false;
        self.timestamp_ms = current_timestamp_ms();
        self
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing `Snapshot` instances.
#[derive(Debug)]
pub struct SnapshotBuilder {
    timestamp_ms: Option<u64>,
    success: bool,
    characters: BTreeMap<String, MetricRecord>,
    realms: BTreeMap<String, MetricRecord>,
}

impl SnapshotBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            timestamp_ms: None,
            success: true,
            characters: BTreeMap::new(),
            realms: BTreeMap::new(),
        }
    }

    /// Set a specific timestamp (milliseconds since Unix epoch).
    pub fn timestamp_ms(mut self, ts: u64) -> Self {
        self.timestamp_ms = Some(ts);
        self
    }

    /// Set the cycle success flag (defaults to `true`).
    pub fn success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    /// Add a character record.
    pub fn character(mut self, key: impl Into<String>, record: MetricRecord) -> Self {
        self.characters.insert(key.into(), record);
        self
    }

    /// Add a realm record.
    pub fn realm(mut self, realm: impl Into<String>, record: MetricRecord) -> Self {
        self.realms.insert(realm.into(), record);
        self
    }

    /// Build the snapshot.
    pub fn build(self) -> Snapshot {
        Snapshot {
            timestamp_ms: self.timestamp_ms.unwrap_or_else(current_timestamp_ms),
            success: self.success,
            characters: self.characters,
            realms: self.realms,
        }
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Get current timestamp in milliseconds since Unix epoch.
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
