//! Building rosters from head counts.
//!
//! The public calculator only asks how many heirs of each kind exist; this
//! module turns those counts into numbered [`HeirRecord`]s.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::labels::Locale;
use crate::types::{HeirRecord, MirathError, Relationship, Result};

/// Head count per relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeirCounts(BTreeMap<Relationship, usize>);

impl HeirCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add `count` heirs of one kind.
    pub fn with(mut self, relationship: Relationship, count: usize) -> Self {
        self.add(relationship, count);
        self
    }

    pub fn add(&mut self, relationship: Relationship, count: usize) {
        *self.0.entry(relationship).or_default() += count;
    }

    pub fn get(&self, relationship: Relationship) -> usize {
        self.0.get(&relationship).copied().unwrap_or(0)
    }

    /// Total number of heirs.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Relationship, usize)> + '_ {
        self.0.iter().map(|(rel, count)| (*rel, *count))
    }
}

impl FromIterator<(Relationship, usize)> for HeirCounts {
    fn from_iter<I: IntoIterator<Item = (Relationship, usize)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (relationship, count) in iter {
            counts.add(relationship, count);
        }
        counts
    }
}

/// One `REL[=COUNT]` argument, e.g. `son=2` or `wife`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeirCountArg {
    pub relationship: Relationship,
    pub count: usize,
}

impl FromStr for HeirCountArg {
    type Err = MirathError;

    fn from_str(s: &str) -> Result<Self> {
        let (code, count) = match s.split_once('=') {
            Some((code, count)) => {
                let count = count.trim().parse::<usize>().map_err(|e| {
                    MirathError::InvalidHeir {
                        heir_id: code.trim().to_string(),
                        reason: format!("invalid count '{}': {}", count.trim(), e),
                    }
                })?;
                (code, count)
            }
            None => (s, 1),
        };
        Ok(Self {
            relationship: code.parse()?,
            count,
        })
    }
}

/// Turns counts into heir records with sequential ids.
#[derive(Debug, Clone, Default)]
pub struct RosterBuilder {
    locale: Locale,
    heirs: Vec<HeirRecord>,
}

impl RosterBuilder {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            heirs: Vec::new(),
        }
    }

    /// Append `count` heirs named "<relationship> 1", "<relationship> 2", ...
    pub fn add(mut self, relationship: Relationship, count: usize) -> Self {
        let name = self.locale.relationship(relationship);
        for n in 1..=count {
            let id = (self.heirs.len() + 1).to_string();
            self.heirs
                .push(HeirRecord::new(id, format!("{} {}", name, n), relationship));
        }
        self
    }

    /// Append every count, in relationship order.
    pub fn add_counts(self, counts: &HeirCounts) -> Self {
        counts
            .iter()
            .fold(self, |builder, (relationship, count)| builder.add(relationship, count))
    }

    pub fn build(self) -> Vec<HeirRecord> {
        self.heirs
    }
}
