//! Per-invocation computation context threaded through the pipeline.
//!
//! Each stage takes the state by value and hands back the updated state,
//! so one invocation owns exactly one context and nothing outlives it.

use std::collections::BTreeMap;

use num_rational::BigRational;

use crate::presence::Presence;
use crate::ratio;
use crate::types::{HeirRecord, Relationship};

/// How an heir came to hold a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareBasis {
    /// Fixed fraction only
    Fixed,
    /// Fixed 1/6 that also takes the residue if any is left
    FixedPendingResiduary,
    /// Residue only
    Residuary,
    /// Fixed 1/6 plus the residue
    FixedAndResiduary,
}

/// A share being built up by stages 2 to 4.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareEntry {
    pub relationship: Relationship,
    pub label: String,
    pub raw: BigRational,
    pub basis: ShareBasis,
}

/// An heir removed from the calculation.
#[derive(Debug, Clone)]
pub struct BlockedHeir<'a> {
    pub heir: &'a HeirRecord,
    pub reason: String,
    /// Id of the blocking rule; `None` for upstream exclusions
    pub rule: Option<&'static str>,
}

/// Scratch state of one engine invocation.
#[derive(Debug, Clone, Default)]
pub struct EngineState<'a> {
    /// Heirs still in the calculation, in roster order
    pub active: Vec<&'a HeirRecord>,
    /// Heirs removed by upstream flags or by blocking
    pub blocked: Vec<BlockedHeir<'a>>,
    /// Running map of heir id to share
    pub shares: BTreeMap<String, ShareEntry>,
}

impl<'a> EngineState<'a> {
    /// Presence snapshot over the active heirs.
    pub fn presence(&self) -> Presence<'a> {
        Presence::of(self.active.iter().copied())
    }

    /// Sum of everything assigned so far, recomputed from scratch.
    pub fn total_assigned(&self) -> BigRational {
        ratio::total(self.shares.values().map(|entry| &entry.raw))
    }
}
