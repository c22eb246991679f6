//! Configuration for the share engine.

use num_rational::BigRational;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::labels::Locale;
use crate::ratio::ShareRatioExt;
use crate::types::{MirathError, Result};

/// Largest rounding scale accepted for presentation values.
const MAX_SCALE: u32 = 10;

/// Configuration of a [`ShareEngine`](crate::ShareEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How far the total may drift from one before reconciliation acts
    pub tolerance: Decimal,
    /// Fractional digits of monetary values
    pub money_scale: u32,
    /// Fractional digits of percentages
    pub percentage_scale: u32,
    /// Language of labels and blocking reasons
    pub locale: Locale,
    /// Reject heirs whose declared gender contradicts their relationship
    pub validate_gender: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance: Decimal::new(1, 4), // 0.0001
            money_scale: 2,
            percentage_scale: 2,
            locale: Locale::Arabic,
            validate_gender: true,
        }
    }
}

impl EngineConfig {
    /// Default config with a given locale.
    pub fn with_locale(locale: Locale) -> Self {
        Self {
            locale,
            ..Default::default()
        }
    }

    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.tolerance.is_sign_negative() {
            return Err(MirathError::Config(format!(
                "tolerance must not be negative, got {}",
                self.tolerance
            )));
        }
        if self.money_scale > MAX_SCALE || self.percentage_scale > MAX_SCALE {
            return Err(MirathError::Config(format!(
                "rounding scale must be at most {}",
                MAX_SCALE
            )));
        }
        Ok(())
    }

    /// Tolerance as an exact rational.
    pub fn tolerance_ratio(&self) -> BigRational {
        BigRational::from_decimal(self.tolerance)
    }
}
