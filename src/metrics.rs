//! Per-file reduction counters.
//!
//! One `MetricsRecord` is filled while a single file is reduced and returned
//! alongside the rewritten text. Run-level aggregation is a per-key sum, so
//! records from files processed in parallel can be merged in any order.

use std::collections::BTreeMap;

use serde::Serialize;

/// Accumulating counters keyed by dotted metric names.
///
/// Keys are created lazily at zero on first `add`. Well-known keys:
/// `removed.<category>`, `trimmed.literals`, `trimmed.bodies`,
/// `bytes_saved`, `lines_saved`, `placeholders_inserted`, `edits.rejected`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsRecord {
    counters: BTreeMap<String, u64>,
}

impl MetricsRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `key`, creating it at zero if absent.
    pub fn add(&mut self, key: &str, amount: u64) {
        *self.counters.entry(key.to_string()).or_insert(0) += amount;
    }

    /// Current value of `key`, zero if never touched.
    pub fn get(&self, key: &str) -> u64 {
        self.counters.get(key).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Fold another record into this one by per-key summation.
    pub fn merge(&mut self, other: &MetricsRecord) {
        for (key, value) in &other.counters {
            *self.counters.entry(key.clone()).or_insert(0) += value;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counters.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
