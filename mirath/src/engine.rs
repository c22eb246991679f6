//! The share engine entry point.
//!
//! `compute` validates the roster, runs the five stages in order and
//! returns a [`Distribution`]. Each invocation owns its own
//! [`EngineState`]; nothing is shared between calls.

use std::collections::{BTreeMap, HashSet};

use num_rational::BigRational;
use num_traits::One;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::blocking;
use crate::config::EngineConfig;
use crate::finalize;
use crate::fixed;
use crate::ratio::{self, ShareRatioExt};
use crate::reconcile::{self, Reconciliation};
use crate::residuary::{self, ResiduaryClass};
use crate::state::EngineState;
use crate::types::{HeirRecord, MirathError, Relationship, Result, ShareRecord};

/// Result of one computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// Amount divided among the heirs
    pub net_estate: Decimal,
    /// Heir ids in roster order
    pub order: Vec<String>,
    /// One record per heir
    pub shares: BTreeMap<String, ShareRecord>,
    /// Adjustment made by stage 4
    pub reconciliation: Reconciliation,
    /// Class that took the remainder, if any
    pub residuary_class: Option<ResiduaryClass>,
    /// Least common denominator of the shares
    pub common_denominator: String,
    /// SHA-256 over the sorted (id, label, share) triples and the net estate
    pub fingerprint: String,
}

impl Distribution {
    pub fn get(&self, heir_id: &str) -> Option<&ShareRecord> {
        self.shares.get(heir_id)
    }

    /// Exact sum of all shares.
    pub fn total_raw_share(&self) -> BigRational {
        ratio::total(self.shares.values().map(|record| &record.raw_share))
    }

    /// Sum of the rounded monetary values.
    pub fn total_value(&self) -> Decimal {
        self.shares.values().map(|record| record.monetary_value).sum()
    }

    /// Unblocked records in roster order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &ShareRecord)> + '_ {
        self.ordered().filter(|(_, record)| !record.is_blocked)
    }

    /// Blocked records in roster order.
    pub fn blocked(&self) -> impl Iterator<Item = (&str, &ShareRecord)> + '_ {
        self.ordered().filter(|(_, record)| record.is_blocked)
    }

    /// All records in roster order.
    pub fn ordered(&self) -> impl Iterator<Item = (&str, &ShareRecord)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.shares.get(id).map(|record| (id.as_str(), record)))
    }

    fn compute_fingerprint(net_estate: Decimal, shares: &BTreeMap<String, ShareRecord>) -> String {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(net_estate.normalize().to_string().as_bytes());

        // BTreeMap iterates in id order
        for (id, record) in shares {
            hasher.update([0u8]);
            hasher.update(id.as_bytes());
            hasher.update([0u8]);
            hasher.update(record.fraction_label.as_bytes());
            hasher.update([0u8]);
            hasher.update(record.raw_share.to_string().as_bytes());
        }

        hex::encode(hasher.finalize())
    }
}

/// Computes inheritance shares for a roster.
#[derive(Debug, Clone, Default)]
pub struct ShareEngine {
    config: EngineConfig,
}

impl ShareEngine {
    /// Engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a validated configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Divide `net_estate` among `heirs`.
    ///
    /// Fails without a partial result on a negative estate or a malformed
    /// roster. Heir records are never modified.
    pub fn compute(&self, net_estate: Decimal, heirs: &[HeirRecord]) -> Result<Distribution> {
        if net_estate.is_sign_negative() && !net_estate.is_zero() {
            return Err(MirathError::NegativeEstate(net_estate));
        }
        self.validate_roster(heirs)?;

        let locale = self.config.locale;
        let state = blocking::resolve(heirs, locale);
        let (state, remainder) = fixed::assign(state, locale);
        let (state, residuary_class) = residuary::assign(state, &remainder, locale);
        let (state, reconciliation) =
            reconcile::apply(state, &self.config.tolerance_ratio(), locale);

        self.check_consistency(&state)?;

        let shares = finalize::finalize(&state, net_estate, &self.config)?;
        let common_denominator =
            ratio::common_denominator(state.shares.values().map(|entry| &entry.raw)).to_string();
        let fingerprint = Distribution::compute_fingerprint(net_estate, &shares);

        info!(
            heirs = heirs.len(),
            active = state.active.len(),
            blocked = state.blocked.len(),
            reconciliation = ?reconciliation,
            net_estate = %net_estate,
            "Shares computed"
        );

        Ok(Distribution {
            net_estate,
            order: heirs.iter().map(|heir| heir.id.clone()).collect(),
            shares,
            reconciliation,
            residuary_class,
            common_denominator,
            fingerprint,
        })
    }

    fn validate_roster(&self, heirs: &[HeirRecord]) -> Result<()> {
        let mut seen = HashSet::new();
        let mut counts: BTreeMap<Relationship, usize> = BTreeMap::new();

        for heir in heirs {
            if heir.id.trim().is_empty() {
                return Err(MirathError::InvalidHeir {
                    heir_id: heir.id.clone(),
                    reason: "id must not be empty".to_string(),
                });
            }
            if !seen.insert(heir.id.as_str()) {
                return Err(MirathError::DuplicateHeir(heir.id.clone()));
            }
            let gender = heir.effective_gender();
            if self.config.validate_gender && gender != heir.relationship.gender() {
                return Err(MirathError::InvalidHeir {
                    heir_id: heir.id.clone(),
                    reason: format!(
                        "gender {:?} contradicts relationship {}",
                        gender, heir.relationship
                    ),
                });
            }

            let count = counts.entry(heir.relationship).or_default();
            *count += 1;
            if let Some(max) = heir.relationship.max_records() {
                if *count > max {
                    return Err(MirathError::InvalidHeir {
                        heir_id: heir.id.clone(),
                        reason: format!("at most {} {} allowed", max, heir.relationship),
                    });
                }
            }
        }

        if counts.contains_key(&Relationship::Husband) && counts.contains_key(&Relationship::Wife) {
            let heir_id = heirs
                .iter()
                .find(|heir| heir.relationship == Relationship::Wife)
                .map(|heir| heir.id.clone())
                .unwrap_or_default();
            return Err(MirathError::InvalidHeir {
                heir_id,
                reason: "a roster cannot hold both a husband and a wife".to_string(),
            });
        }

        Ok(())
    }

    fn check_consistency(&self, state: &EngineState<'_>) -> Result<()> {
        if state.shares.is_empty() {
            return Ok(());
        }
        let total = state.total_assigned();
        let consistent = total.within(&BigRational::one(), &self.config.tolerance_ratio());
        debug_assert!(consistent, "shares total {} after reconciliation", total);
        if !consistent {
            error!(total = %total, "Shares do not add up after reconciliation");
            return Err(MirathError::ReconciliationInconsistency {
                total: total.to_string(),
            });
        }
        Ok(())
    }
}

/// Compute with the default configuration.
pub fn compute(net_estate: Decimal, heirs: &[HeirRecord]) -> Result<Distribution> {
    ShareEngine::new().compute(net_estate, heirs)
}
