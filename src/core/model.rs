// File: src/core/model.rs
use crate::core::merger::RelationSink;
use crate::core::types::{Relation, Sense, SenseKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// In-memory lexical model. Only the parts the collocation tools touch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordnetModel {
    pub senses: Vec<Sense>,
}

impl WordnetModel {
    pub fn new(senses: Vec<Sense>) -> Self {
        Self { senses }
    }

    pub fn sense(&self, id: &str) -> Option<&Sense> {
        self.senses.iter().find(|s| s.id == id)
    }

    /// Materializes the reverse of every relation whose type has one.
    /// Targets outside the model are ignored, as are reverses already present.
    /// Returns the number of relations added.
    pub fn extend(&mut self) -> usize {
        let positions: HashMap<&str, usize> = self
            .senses
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.as_str(), i))
            .collect();

        let mut pending: Vec<(usize, Relation)> = Vec::new();
        for sense in &self.senses {
            for relation in sense.relations() {
                let (Some(inverse), Some(&target)) = (
                    relation.relation_type.inverse(),
                    positions.get(relation.target.as_str()),
                ) else {
                    continue;
                };
                pending.push((target, Relation::new(sense.id.clone(), inverse)));
            }
        }

        let mut added = 0;
        for (target, relation) in pending {
            let relations = self.senses[target].relations.get_or_insert_with(Vec::new);
            if !relations.contains(&relation) {
                relations.push(relation);
                added += 1;
            }
        }
        added
    }
}

impl RelationSink for WordnetModel {
    fn len(&self) -> usize {
        self.senses.len()
    }

    fn sense_key(&self, index: usize) -> &SenseKey {
        &self.senses[index].id
    }

    fn append(&mut self, index: usize, relation: Relation) {
        self.senses[index]
            .relations
            .get_or_insert_with(Vec::new)
            .push(relation);
    }
}
