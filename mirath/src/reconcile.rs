//! Shortfall and overflow reconciliation (awal and radd).
//!
//! After the fixed and residuary stages the shares may add up to more or
//! less than the whole estate. Overflow is scaled down proportionally;
//! a shortfall goes back to the blood relatives in proportion to what they
//! already hold, and to the spouses only when nobody else holds a share.

use num_rational::BigRational;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::labels::Locale;
use crate::ratio::{self, ShareRatioExt};
use crate::state::EngineState;

/// Adjustment applied by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reconciliation {
    /// Shares already added up to the estate
    #[default]
    Balanced,
    /// Shares exceeded the estate and were scaled down
    Awal,
    /// The shortfall went back to non-spouse heirs
    Radd,
    /// Only spouses held shares, so the shortfall went back to them
    RaddToSpouses,
}

/// Stage 4: bring the total of all shares back to one.
pub fn apply<'a>(
    mut state: EngineState<'a>,
    tolerance: &BigRational,
    locale: Locale,
) -> (EngineState<'a>, Reconciliation) {
    let total = state.total_assigned();
    let one = BigRational::one();

    if total.is_zero() || total.within(&one, tolerance) {
        return (state, Reconciliation::Balanced);
    }

    if total > one {
        for entry in state.shares.values_mut() {
            entry.raw = &entry.raw / &total;
            entry.label.push_str(locale.awal_suffix());
        }
        info!(total = %total, "Awal applied");
        return (state, Reconciliation::Awal);
    }

    let shortfall = &one - &total;
    let eligible_total = ratio::total(
        state
            .shares
            .values()
            .filter(|entry| !entry.relationship.is_spouse())
            .map(|entry| &entry.raw),
    );

    let (pool, outcome) = if eligible_total > BigRational::zero() {
        (eligible_total, Reconciliation::Radd)
    } else {
        (total.clone(), Reconciliation::RaddToSpouses)
    };

    for entry in state.shares.values_mut() {
        if outcome == Reconciliation::Radd && entry.relationship.is_spouse() {
            continue;
        }
        let returned = &shortfall * &entry.raw / &pool;
        entry.raw += returned;
        entry.label.push_str(locale.radd_suffix());
    }

    info!(total = %total, shortfall = %shortfall, outcome = ?outcome, "Radd applied");
    (state, outcome)
}
