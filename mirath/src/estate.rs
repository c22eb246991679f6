//! Net estate derivation from recorded totals.
//!
//! Debts come out first; bequests are honoured up to a third of what is
//! left. What remains is what the heirs divide.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{MirathError, Result};

/// Totals recorded against an estate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstateTotals {
    pub assets: Decimal,
    pub debts: Decimal,
    pub bequests: Decimal,
}

/// Breakdown of the amount available to heirs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetEstate {
    /// Assets less debts, before clamping
    pub after_debts: Decimal,
    /// Bequests actually paid out, capped at a third
    pub effective_bequests: Decimal,
    /// Amount divided among heirs, never negative
    pub net: Decimal,
}

impl NetEstate {
    /// Apply debts and the one-third bequest cap.
    pub fn derive(totals: EstateTotals) -> Result<Self> {
        for (field, value) in [
            ("assets", totals.assets),
            ("debts", totals.debts),
            ("bequests", totals.bequests),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(MirathError::InvalidEstate(format!(
                    "{} must not be negative, got {}",
                    field, value
                )));
            }
        }

        let after_debts = totals
            .assets
            .checked_sub(totals.debts)
            .ok_or_else(|| MirathError::InvalidEstate("assets less debts overflows".to_string()))?;
        let bequest_cap = (after_debts / Decimal::from(3)).max(Decimal::ZERO);
        let effective_bequests = totals.bequests.min(bequest_cap);
        let mut net = after_debts - effective_bequests;

        if net.is_sign_negative() && !net.is_zero() {
            warn!(
                assets = %totals.assets,
                debts = %totals.debts,
                "Debts exceed assets, net estate clamped to zero"
            );
            net = Decimal::ZERO;
        }

        debug!(after_debts = %after_debts, effective_bequests = %effective_bequests, net = %net, "Net estate derived");
        Ok(Self {
            after_debts,
            effective_bequests,
            net,
        })
    }
}
