//! Distribution table: collected subtree values keyed by position string
//!
//! Filled write-once per key during the collection phase, then handed
//! read-only to the final search pass. The first value recorded for a key
//! wins; later writes for the same key are ignored, so a late duplicate
//! worker reply cannot overwrite a value the final pass may already rely on.

use std::collections::HashMap;

/// Position string -> normalized subtree value
#[derive(Debug, Default)]
pub struct DistributionTable {
    values: HashMap<String, i64>,
}

impl DistributionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for `key` unless one is already present
    pub fn insert(&mut self, key: String, value: i64) {
        self.values.entry(key).or_insert(value);
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_wins() {
        let mut table = DistributionTable::new();
        table.insert("k".into(), 10);
        table.insert("k".into(), 99);
        assert_eq!(table.get("k"), Some(10));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("missing"), None);
    }
}
