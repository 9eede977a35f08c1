//! Relation registry
//!
//! Relations are keyed by the sorted pair of kind names, joined with `:`
//! since kinds themselves contain `_`. A lookup finds the same relation
//! whichever side asks.

use crate::object::TypeMeta;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// The child row holds `<parent kind>_<parent pk>`
    Ownership,
    /// A junction table holds both sides' keys
    ManyToMany,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Ownership => write!(f, "ownership"),
            RelationKind::ManyToMany => write!(f, "many-to-many"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub kind: RelationKind,
    pub source: &'static TypeMeta,
    pub target: &'static TypeMeta,
    /// Junction type of a many-to-many relation
    pub via: Option<&'static TypeMeta>,
}

impl Relation {
    pub fn key(&self) -> String {
        relation_key(self.source.kind, self.target.kind)
    }
}

const KEY_SEPARATOR: char = ':';

/// Order-independent key of a kind pair
pub fn relation_key(a: &str, b: &str) -> String {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    format!("{}{}{}", first, KEY_SEPARATOR, second)
}

#[derive(Debug, Default, Clone)]
pub struct RelationRegistry {
    relations: HashMap<String, Relation>,
}

impl RelationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a relation. A later registration for the same pair replaces
    /// the earlier one.
    pub fn register(
        &mut self,
        source: &'static TypeMeta,
        target: &'static TypeMeta,
        via: Option<&'static TypeMeta>,
        kind: RelationKind,
    ) -> &Relation {
        let relation = Relation { kind, source, target, via };
        let key = relation.key();
        tracing::debug!(key = %key, kind = %kind, "relation registered");
        self.relations.insert(key.clone(), relation);
        &self.relations[&key]
    }

    pub fn resolve(&self, a: &str, b: &str) -> Option<&Relation> {
        self.relations.get(&relation_key(a, b))
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}
