//! Presence snapshots over a set of heirs.
//!
//! Every rule in the engine asks "is there a son?", "how many wives?".
//! A snapshot answers those questions from one fixed view of the roster,
//! so decisions taken while the roster is being partitioned never see a
//! half-updated set.

use std::collections::BTreeMap;

use crate::types::{HeirRecord, Relationship};

/// Heirs grouped by relationship, preserving roster order inside each group.
#[derive(Debug, Clone, Default)]
pub struct Presence<'a> {
    groups: BTreeMap<Relationship, Vec<&'a HeirRecord>>,
}

impl<'a> Presence<'a> {
    /// Snapshot the given heirs.
    pub fn of<I>(heirs: I) -> Self
    where
        I: IntoIterator<Item = &'a HeirRecord>,
    {
        let mut groups: BTreeMap<Relationship, Vec<&'a HeirRecord>> = BTreeMap::new();
        for heir in heirs {
            groups.entry(heir.relationship).or_default().push(heir);
        }
        Self { groups }
    }

    pub fn has(&self, relationship: Relationship) -> bool {
        self.count(relationship) > 0
    }

    pub fn has_any(&self, relationships: &[Relationship]) -> bool {
        relationships.iter().any(|rel| self.has(*rel))
    }

    pub fn count(&self, relationship: Relationship) -> usize {
        self.groups.get(&relationship).map_or(0, Vec::len)
    }

    pub fn count_of(&self, relationships: &[Relationship]) -> usize {
        relationships.iter().map(|rel| self.count(*rel)).sum()
    }

    /// Members of one category in roster order.
    pub fn members(&self, relationship: Relationship) -> &[&'a HeirRecord] {
        self.groups
            .get(&relationship)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// First member of the first present category, in the order given.
    pub fn first_of(&self, relationships: &[Relationship]) -> Option<&'a HeirRecord> {
        relationships
            .iter()
            .find_map(|rel| self.members(*rel).first().copied())
    }

    /// Son or son's son.
    pub fn has_male_descendant(&self) -> bool {
        self.has_any(&[Relationship::Son, Relationship::SonOfSon])
    }

    /// Daughter or son's daughter.
    pub fn has_female_descendant(&self) -> bool {
        self.has_any(&[Relationship::Daughter, Relationship::DaughterOfSon])
    }

    pub fn has_descendant(&self) -> bool {
        self.has_male_descendant() || self.has_female_descendant()
    }

    /// Heirs in the six sibling categories.
    pub fn sibling_count(&self) -> usize {
        self.count_of(&Relationship::SIBLINGS)
    }
}
