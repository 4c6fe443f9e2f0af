// File: src/core/scan.rs
use crate::core::model::WordnetModel;
use crate::core::types::RelationType;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollocationCounts {
    pub collocations: usize,
    pub inverses: usize,
}

/// Materializes derived reverse relations (unless `extend` is off), then
/// counts collocations.
pub fn scan_model(wn: &mut WordnetModel, extend: bool) -> CollocationCounts {
    if extend {
        let added = wn.extend();
        tracing::info!("extended with {added} derived relations");
    }
    count_collocations(wn)
}

/// Counts collocation relations already present in a model.
pub fn count_collocations(wn: &WordnetModel) -> CollocationCounts {
    let mut counts = CollocationCounts::default();
    for sense in &wn.senses {
        for relation in sense.relations() {
            match relation.relation_type {
                RelationType::Collocation => {
                    tracing::debug!("{} > {}", sense.id, relation.target);
                    counts.collocations += 1;
                }
                RelationType::CollocationInverse => {
                    tracing::debug!("{} < {}", sense.id, relation.target);
                    counts.inverses += 1;
                }
                _ => {}
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Relation, Sense};

    #[test]
    fn counts_both_directions_and_ignores_other_kinds() {
        let mut a = Sense::new("a");
        a.relations = Some(vec![
            Relation::new("b", RelationType::Collocation),
            Relation::new("c", RelationType::Antonym),
        ]);
        let mut wn = WordnetModel::new(vec![a, Sense::new("b"), Sense::new("c")]);

        assert_eq!(
            count_collocations(&wn),
            CollocationCounts { collocations: 1, inverses: 0 }
        );
        wn.extend();
        assert_eq!(
            count_collocations(&wn),
            CollocationCounts { collocations: 1, inverses: 1 }
        );
    }

    #[test]
    fn scan_extends_one_way_models_unless_told_not_to() {
        let one_way = || {
            let mut a = Sense::new("a");
            a.relations = Some(vec![Relation::new("b", RelationType::Collocation)]);
            WordnetModel::new(vec![a, Sense::new("b")])
        };

        let mut wn = one_way();
        assert_eq!(scan_model(&mut wn, false), CollocationCounts { collocations: 1, inverses: 0 });
        assert_eq!(wn, one_way());

        let mut wn = one_way();
        assert_eq!(scan_model(&mut wn, true), CollocationCounts { collocations: 1, inverses: 1 });
    }
}
