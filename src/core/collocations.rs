// File: src/core/collocations.rs
use crate::core::rows::RowPair;
use crate::core::types::{Direction, SenseKey};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// An unordered pair of sense keys, stored sorted so `{a, b} == {b, a}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollocationPair(SenseKey, SenseKey);

impl CollocationPair {
    pub fn new(a: impl Into<SenseKey>, b: impl Into<SenseKey>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn keys(&self) -> [&SenseKey; 2] {
        [&self.0, &self.1]
    }

    pub fn is_reflexive(&self) -> bool {
        self.0 == self.1
    }
}

impl fmt::Display for CollocationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.0, self.1)
    }
}

/// A structural problem found while building collocations. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    Reflexive { row: usize, key: SenseKey },
    Duplicate { row: usize, pair: CollocationPair },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Reflexive { row, key } => write!(f, "{row} {key} - {key} reflexive"),
            Diagnostic::Duplicate { row, pair } => write!(f, "{row} {pair} duplicate"),
        }
    }
}

// --- Validation variant: order-insensitive set used for auditing ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Leave reflexive rows out of the set instead of only reporting them.
    pub drop_reflexive: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CollocationSet {
    pairs: HashSet<CollocationPair>,
}

impl CollocationSet {
    /// First occurrence of a pair wins; every later occurrence, in either
    /// key order, is reported as a duplicate.
    pub fn build<'a>(
        rows: impl IntoIterator<Item = &'a RowPair>,
        options: SetOptions,
    ) -> (Self, Vec<Diagnostic>) {
        let mut set = Self::default();
        let mut diagnostics = Vec::new();

        for row in rows {
            if row.is_reflexive() {
                diagnostics.push(Diagnostic::Reflexive { row: row.row, key: row.key1.clone() });
                if options.drop_reflexive {
                    continue;
                }
            }

            let pair = CollocationPair::new(row.key1.as_str(), row.key2.as_str());
            if set.pairs.contains(&pair) {
                diagnostics.push(Diagnostic::Duplicate { row: row.row, pair: pair.clone() });
            }
            set.pairs.insert(pair);
        }
        (set, diagnostics)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, pair: &CollocationPair) -> bool {
        self.pairs.contains(pair)
    }

    /// Every key on either side of every pair, repeats included.
    pub fn keys(&self) -> impl Iterator<Item = &SenseKey> {
        self.pairs.iter().flat_map(|p| p.keys())
    }
}

// --- Merge variant: directional adjacency keyed by raw sense key ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyOptions {
    /// Also record key2 -> key1 as `Inverse`.
    pub inverse: bool,
    /// Skip reflexive rows entirely.
    pub drop_reflexive: bool,
}

impl Default for AdjacencyOptions {
    fn default() -> Self {
        Self { inverse: true, drop_reflexive: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collocate {
    pub key: SenseKey,
    pub direction: Direction,
}

/// Not deduplicated: a repeated row yields repeated entries.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyMap {
    entries: HashMap<SenseKey, Vec<Collocate>>,
}

impl AdjacencyMap {
    pub fn build<'a>(
        rows: impl IntoIterator<Item = &'a RowPair>,
        options: AdjacencyOptions,
    ) -> (Self, Vec<Diagnostic>) {
        let mut map = Self::default();
        let mut diagnostics = Vec::new();

        for row in rows {
            if row.is_reflexive() {
                diagnostics.push(Diagnostic::Reflexive { row: row.row, key: row.key1.clone() });
                if options.drop_reflexive {
                    continue;
                }
            }

            map.push(&row.key1, &row.key2, Direction::Forward);
            if options.inverse {
                map.push(&row.key2, &row.key1, Direction::Inverse);
            }
        }
        (map, diagnostics)
    }

    fn push(&mut self, from: &str, to: &str, direction: Direction) {
        self.entries
            .entry(from.to_string())
            .or_default()
            .push(Collocate { key: to.to_string(), direction });
    }

    pub fn get(&self, key: &str) -> Option<&[Collocate]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Total entries across all keys.
    pub fn collocated_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Every key on either side of every entry, repeats included.
    pub fn keys(&self) -> impl Iterator<Item = &SenseKey> {
        self.entries
            .iter()
            .flat_map(|(k, v)| std::iter::once(k).chain(v.iter().map(|c| &c.key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rows(pairs: &[(&str, &str)]) -> Vec<RowPair> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, (a, b))| RowPair::new(i + 1, *a, *b))
            .collect()
    }

    #[test]
    fn pair_is_order_insensitive() {
        assert_eq!(CollocationPair::new("b", "a"), CollocationPair::new("a", "b"));
        assert_eq!(CollocationPair::new("b", "a").to_string(), "{a, b}");
    }

    #[test]
    fn reflexive_row_is_reported_and_kept_in_audit_set() {
        let input = rows(&[("a", "a")]);
        let (set, diags) = CollocationSet::build(&input, SetOptions::default());
        assert_eq!(diags, vec![Diagnostic::Reflexive { row: 1, key: "a".into() }]);
        assert_eq!(diags[0].to_string(), "1 a - a reflexive");
        assert!(set.contains(&CollocationPair::new("a", "a")));
    }

    #[test]
    fn reflexive_row_can_be_dropped_from_audit_set() {
        let input = rows(&[("a", "a")]);
        let (set, diags) = CollocationSet::build(&input, SetOptions { drop_reflexive: true });
        assert_eq!(diags.len(), 1);
        assert!(set.is_empty());
    }

    #[test]
    fn swapped_repeat_is_one_duplicate() {
        let input = rows(&[("a", "b"), ("b", "a")]);
        let (set, diags) = CollocationSet::build(&input, SetOptions::default());
        assert_eq!(set.len(), 1);
        assert_eq!(
            diags,
            vec![Diagnostic::Duplicate { row: 2, pair: CollocationPair::new("a", "b") }]
        );
        assert_eq!(diags[0].to_string(), "2 {a, b} duplicate");
    }

    #[test]
    fn every_later_repeat_is_flagged() {
        let input = rows(&[("a", "b"), ("a", "b"), ("a", "b")]);
        let (_, diags) = CollocationSet::build(&input, SetOptions::default());
        let flagged: Vec<usize> = diags
            .iter()
            .map(|d| match d {
                Diagnostic::Duplicate { row, .. } => *row,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(flagged, vec![2, 3]);
    }

    #[test]
    fn adjacency_with_inverse() {
        let input = rows(&[("a", "b")]);
        let (map, diags) = AdjacencyMap::build(&input, AdjacencyOptions::default());
        assert!(diags.is_empty());
        assert_eq!(
            map.get("a").unwrap(),
            &[Collocate { key: "b".into(), direction: Direction::Forward }]
        );
        assert_eq!(
            map.get("b").unwrap(),
            &[Collocate { key: "a".into(), direction: Direction::Inverse }]
        );
        assert_eq!(map.collocated_count(), 2);
    }

    #[test]
    fn adjacency_without_inverse() {
        let input = rows(&[("a", "b")]);
        let options = AdjacencyOptions { inverse: false, ..Default::default() };
        let (map, _) = AdjacencyMap::build(&input, options);
        assert_eq!(map.get("a").unwrap().len(), 1);
        assert!(map.get("b").is_none());
    }

    #[test]
    fn adjacency_drops_reflexive_rows() {
        let input = rows(&[("a", "a")]);
        let (map, diags) = AdjacencyMap::build(&input, AdjacencyOptions::default());
        assert_eq!(map.collocated_count(), 0);
        assert_eq!(diags, vec![Diagnostic::Reflexive { row: 1, key: "a".into() }]);
    }

    #[test]
    fn adjacency_keeps_repeats() {
        let input = rows(&[("a", "b"), ("a", "b")]);
        let (map, diags) = AdjacencyMap::build(&input, AdjacencyOptions::default());
        assert!(diags.is_empty());
        assert_eq!(map.get("a").unwrap().len(), 2);
        assert_eq!(map.get("b").unwrap().len(), 2);
    }

    proptest! {
        #[test]
        fn duplicates_account_for_every_collapsed_row(
            raw in prop::collection::vec(("[a-d]", "[a-d]"), 0..40)
        ) {
            let input: Vec<RowPair> = raw
                .iter()
                .enumerate()
                .map(|(i, (a, b))| RowPair::new(i + 1, a.as_str(), b.as_str()))
                .collect();
            let (set, diags) = CollocationSet::build(&input, SetOptions::default());
            let duplicates = diags
                .iter()
                .filter(|d| matches!(d, Diagnostic::Duplicate { .. }))
                .count();
            prop_assert_eq!(set.len() + duplicates, input.len());
        }
    }
}
