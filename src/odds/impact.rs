use std::fmt;

use rust_decimal::Decimal;

use super::{calculate_odds, OddsPolicy, OddsTable, OptionOdds};
use crate::error::OddsError;
use crate::state::Market;

/// How far a stake would move its option's share of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactLevel {
    Minor,
    Moderate,
    Significant,
}

impl ImpactLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Significant => "significant",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Before/after odds for a proposed stake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OddsImpact {
    pub option_id: String,
    pub stake: u64,
    /// Odds for the market as it stands
    pub current: OddsTable,
    /// Odds once the stake is in the pool
    pub projected: OddsTable,
    /// Absolute change in the target option's percentage, in points
    pub percentage_shift: Decimal,
    pub level: ImpactLevel,
}

impl OddsImpact {
    /// Current odds of the target option.
    pub fn current_odds(&self) -> Option<&OptionOdds> {
        self.current.get(&self.option_id)
    }

    /// Projected odds of the target option.
    pub fn projected_odds(&self) -> Option<&OptionOdds> {
        self.projected.get(&self.option_id)
    }
}

/// Preview how a stake on `option_id` would move the market's odds.
///
/// The market is not modified; the projection runs on a copy with the stake
/// added to the option and the pool. A zero stake projects the current odds.
pub fn preview_odds_impact(
    stake: u64,
    option_id: &str,
    market: &Market,
    policy: &OddsPolicy,
) -> Result<OddsImpact, OddsError> {
    let projected_market = market.with_stake(option_id, stake)?;

    let current = calculate_odds(market, policy);
    let projected = calculate_odds(&projected_market, policy);

    // with_stake already rejected unknown options
    let current_pct = current.get(option_id).map_or(Decimal::ZERO, |o| o.percentage);
    let projected_pct = projected.get(option_id).map_or(Decimal::ZERO, |o| o.percentage);
    let percentage_shift = (projected_pct - current_pct).abs();
    let level = policy.classify(percentage_shift);

    tracing::debug!(
        market_id = %market.id,
        option_id,
        stake,
        %current_pct,
        %projected_pct,
        level = %level,
        "previewed odds impact"
    );

    Ok(OddsImpact {
        option_id: option_id.to_string(),
        stake,
        current,
        projected,
        percentage_shift,
        level,
    })
}
