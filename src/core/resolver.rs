// File: src/core/resolver.rs
use crate::core::merger::RelationSink;
use crate::core::types::SenseKey;
use std::collections::{BTreeSet, HashSet};

/// Every sense key known to the loaded model. Built once per run.
#[derive(Debug, Clone, Default)]
pub struct SenseKeyUniverse {
    keys: HashSet<SenseKey>,
}

impl SenseKeyUniverse {
    pub fn from_sink(sink: &impl RelationSink) -> Self {
        (0..sink.len()).map(|i| sink.sense_key(i).clone()).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Keys absent from the universe, deduplicated and sorted ascending.
    pub fn unresolved<'a>(&self, keys: impl IntoIterator<Item = &'a SenseKey>) -> Vec<SenseKey> {
        keys.into_iter()
            .filter(|k| !self.contains(k))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<SenseKey> for SenseKeyUniverse {
    fn from_iter<I: IntoIterator<Item = SenseKey>>(iter: I) -> Self {
        Self { keys: iter.into_iter().collect() }
    }
}
