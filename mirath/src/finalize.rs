//! Stage 5: turn exact shares into presentation records.

use std::collections::BTreeMap;

use num_rational::BigRational;
use num_traits::Zero;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EngineConfig;
use crate::ratio::ShareRatioExt;
use crate::state::EngineState;
use crate::types::{MirathError, Result, ShareRecord};

fn round(value: &BigRational, scale: u32) -> Result<Decimal> {
    value.round_half_up(scale).ok_or_else(|| {
        MirathError::InvalidEstate(format!("value {} does not fit a decimal", value))
    })
}

fn zero_record(label: &str, reason: Option<String>, is_blocked: bool) -> ShareRecord {
    ShareRecord {
        fraction_label: label.to_string(),
        raw_share: BigRational::zero(),
        percentage: Decimal::ZERO,
        monetary_value: Decimal::ZERO,
        is_blocked,
        blocking_reason: reason,
    }
}

/// Build one record per heir: blocked, shareholding, or left with nothing.
///
/// Percentages and values are derived from the exact share and never fed back.
pub fn finalize(
    state: &EngineState<'_>,
    net_estate: Decimal,
    config: &EngineConfig,
) -> Result<BTreeMap<String, ShareRecord>> {
    let locale = config.locale;
    let estate = BigRational::from_decimal(net_estate);
    let hundred = BigRational::from_integer(100.into());
    let mut records = BTreeMap::new();

    for blocked in &state.blocked {
        records.insert(
            blocked.heir.id.clone(),
            zero_record(locale.blocked(), Some(blocked.reason.clone()), true),
        );
    }

    for heir in &state.active {
        let record = match state.shares.get(&heir.id) {
            Some(entry) => ShareRecord {
                fraction_label: entry.label.clone(),
                raw_share: entry.raw.clone(),
                percentage: round(&(&entry.raw * &hundred), config.percentage_scale)?,
                monetary_value: round(&(&entry.raw * &estate), config.money_scale)?,
                is_blocked: false,
                blocking_reason: None,
            },
            None => {
                debug!(heir_id = %heir.id, relationship = %heir.relationship, "Active heir left without share");
                zero_record(locale.no_share(), None, false)
            }
        };
        records.insert(heir.id.clone(), record);
    }

    Ok(records)
}
