// File: src/core/merger.rs
use crate::core::collocations::AdjacencyMap;
use crate::core::resolver::SenseKeyUniverse;
use crate::core::types::{Relation, SenseKey};
use serde::Serialize;
use std::fmt;

/// Anything that holds senses and accepts appended relations.
/// Existing relations are never touched.
pub trait RelationSink {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sense_key(&self, index: usize) -> &SenseKey;

    fn append(&mut self, index: usize, relation: Relation);
}

/// A collocation entry whose target is not a known sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeFailure {
    pub source: SenseKey,
    pub target: SenseKey,
}

impl fmt::Display for MergeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} target not resolvable in collocation {}-{}",
            self.target, self.source, self.target
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub added: usize,
    pub failures: Vec<MergeFailure>,
}

impl MergeOutcome {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Appends one typed relation per resolvable adjacency entry, walking senses
/// in sink order. Failures are per entry; earlier appends are kept.
/// Running this twice appends everything twice.
pub fn merge_collocations(
    sink: &mut impl RelationSink,
    universe: &SenseKeyUniverse,
    adjacency: &AdjacencyMap,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for index in 0..sink.len() {
        let Some(collocates) = adjacency.get(sink.sense_key(index)) else {
            continue;
        };
        for collocate in collocates {
            if !universe.contains(&collocate.key) {
                outcome.failures.push(MergeFailure {
                    source: sink.sense_key(index).clone(),
                    target: collocate.key.clone(),
                });
                continue;
            }
            let relation = Relation::new(collocate.key.clone(), collocate.direction.relation_type());
            sink.append(index, relation);
            outcome.added += 1;
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collocations::AdjacencyOptions;
    use crate::core::rows::RowPair;
    use crate::core::types::RelationType;

    /// Records appends without any model behind it.
    #[derive(Default)]
    struct FakeSink {
        keys: Vec<SenseKey>,
        appended: Vec<(usize, Relation)>,
    }

    impl FakeSink {
        fn with_keys(keys: &[&str]) -> Self {
            Self { keys: keys.iter().map(|k| k.to_string()).collect(), ..Default::default() }
        }
    }

    impl RelationSink for FakeSink {
        fn len(&self) -> usize {
            self.keys.len()
        }

        fn sense_key(&self, index: usize) -> &SenseKey {
            &self.keys[index]
        }

        fn append(&mut self, index: usize, relation: Relation) {
            self.appended.push((index, relation));
        }
    }

    fn forward_only(rows: &[(&str, &str)]) -> AdjacencyMap {
        let rows: Vec<RowPair> = rows
            .iter()
            .enumerate()
            .map(|(i, (a, b))| RowPair::new(i + 1, *a, *b))
            .collect();
        let options = AdjacencyOptions { inverse: false, ..Default::default() };
        AdjacencyMap::build(&rows, options).0
    }

    #[test]
    fn resolvable_target_becomes_collocation() {
        let mut sink = FakeSink::with_keys(&["A", "B"]);
        let universe = SenseKeyUniverse::from_sink(&sink);
        let outcome = merge_collocations(&mut sink, &universe, &forward_only(&[("A", "B")]));

        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.failed(), 0);
        assert_eq!(sink.appended, vec![(0, Relation::new("B", RelationType::Collocation))]);
    }

    #[test]
    fn unresolvable_target_is_counted_not_appended() {
        let mut sink = FakeSink::with_keys(&["A"]);
        let universe = SenseKeyUniverse::from_sink(&sink);
        let outcome = merge_collocations(&mut sink, &universe, &forward_only(&[("A", "B")]));

        assert_eq!(outcome.added, 0);
        assert_eq!(
            outcome.failures,
            vec![MergeFailure { source: "A".into(), target: "B".into() }]
        );
        assert_eq!(
            outcome.failures[0].to_string(),
            "B target not resolvable in collocation A-B"
        );
        assert!(sink.appended.is_empty());
    }

    #[test]
    fn failures_do_not_undo_earlier_appends() {
        let mut sink = FakeSink::with_keys(&["A", "B"]);
        let universe = SenseKeyUniverse::from_sink(&sink);
        let adjacency = forward_only(&[("A", "B"), ("A", "missing"), ("A", "B")]);
        let outcome = merge_collocations(&mut sink, &universe, &adjacency);

        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.failed(), 1);
        assert_eq!(sink.appended.len(), 2);
    }

    #[test]
    fn source_keys_outside_the_sink_are_ignored() {
        let mut sink = FakeSink::with_keys(&["B"]);
        let universe = SenseKeyUniverse::from_sink(&sink);
        let outcome = merge_collocations(&mut sink, &universe, &forward_only(&[("A", "B")]));
        assert_eq!(outcome, MergeOutcome::default());
    }
}
