use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::ImpactLevel;
use crate::error::ConfigError;

/// Policy constants for the odds calculator.
///
/// None of these are laws of the domain. They are product conventions that
/// the UI has always used, kept configurable under `[policy]` in config.toml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OddsPolicy {
    /// Odds reported for an option nobody has backed yet (decimal odds).
    pub fallback_odds: Decimal,
    /// Percentage-point shift below which a stake counts as a minor impact.
    pub minor_shift: Decimal,
    /// Percentage-point shift above which a stake counts as significant.
    pub significant_shift: Decimal,
}

impl Default for OddsPolicy {
    fn default() -> Self {
        Self {
            fallback_odds: dec!(2.0), // even odds
            minor_shift: dec!(2),     // <2 points
            significant_shift: dec!(10), // >10 points
        }
    }
}

impl OddsPolicy {
    /// Reject policies that would produce losing payouts or overlapping bands.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_odds < Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "policy.fallback_odds",
                reason: format!("must be at least 1, got {}", self.fallback_odds),
            });
        }
        if self.minor_shift.is_sign_negative() {
            return Err(ConfigError::InvalidValue {
                field: "policy.minor_shift",
                reason: format!("must not be negative, got {}", self.minor_shift),
            });
        }
        if self.minor_shift > self.significant_shift {
            return Err(ConfigError::InvalidValue {
                field: "policy.significant_shift",
                reason: format!(
                    "must be at least minor_shift ({}), got {}",
                    self.minor_shift, self.significant_shift
                ),
            });
        }
        Ok(())
    }

    /// Classify a shift in percentage points.
    ///
    /// | Shift                 | Level       |
    /// |-----------------------|-------------|
    /// | < minor_shift         | Minor       |
    /// | minor..=significant   | Moderate    |
    /// | > significant_shift   | Significant |
    pub fn classify(&self, shift: Decimal) -> ImpactLevel {
        let shift = shift.abs();
        if shift < self.minor_shift {
            ImpactLevel::Minor
        } else if shift > self.significant_shift {
            ImpactLevel::Significant
        } else {
            ImpactLevel::Moderate
        }
    }
}
