// src/core/types.rs
use serde::{Deserialize, Serialize};

/// An opaque sense key naming one word sense, e.g. `bank%1:14:00::`.
pub type SenseKey = String;

/// Which way a collocation points relative to the row it was authored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// key1 -> key2, as written in the row.
    Forward,
    /// key2 -> key1, the materialized reciprocal.
    Inverse,
}

impl Direction {
    pub fn relation_type(self) -> RelationType {
        match self {
            Direction::Forward => RelationType::Collocation,
            Direction::Inverse => RelationType::CollocationInverse,
        }
    }
}

/// Closed set of sense relation kinds known to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    Antonym,
    Also,
    Participle,
    Pertainym,
    Derivation,
    DomainTopic,
    HasDomainTopic,
    DomainRegion,
    HasDomainRegion,
    Exemplifies,
    IsExemplifiedBy,
    Similar,
    Other,
    Collocation,
    #[serde(rename = "collocation_inv")]
    CollocationInverse,
}

impl RelationType {
    /// The type materialized on the target when relations are extended.
    /// `None` means the relation is one-way.
    pub fn inverse(self) -> Option<RelationType> {
        use RelationType::*;
        match self {
            Antonym | Also | Derivation | Similar => Some(self),
            DomainTopic => Some(HasDomainTopic),
            HasDomainTopic => Some(DomainTopic),
            DomainRegion => Some(HasDomainRegion),
            HasDomainRegion => Some(DomainRegion),
            Exemplifies => Some(IsExemplifiedBy),
            IsExemplifiedBy => Some(Exemplifies),
            Collocation => Some(CollocationInverse),
            CollocationInverse => Some(Collocation),
            Participle | Pertainym | Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub target: SenseKey,
    pub relation_type: RelationType,
}

impl Relation {
    pub fn new(target: impl Into<SenseKey>, relation_type: RelationType) -> Self {
        Self { target: target.into(), relation_type }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sense {
    pub id: SenseKey,
    /// `None` until the first relation is attached. Always serialized:
    /// snapshots are not self-describing.
    #[serde(default)]
    pub relations: Option<Vec<Relation>>,
}

impl Sense {
    pub fn new(id: impl Into<SenseKey>) -> Self {
        Self { id: id.into(), relations: None }
    }

    pub fn relations(&self) -> &[Relation] {
        self.relations.as_deref().unwrap_or(&[])
    }
}
