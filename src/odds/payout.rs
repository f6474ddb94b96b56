use rust_decimal::Decimal;

use super::calculator::option_odds;
use super::OddsPolicy;
use crate::error::OddsError;
use crate::state::Market;

/// Payout estimate for a stake at the current price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub stake: u64,
    /// Odds locked in at commitment time
    pub odds: Decimal,
    /// stake * odds
    pub gross_payout: Decimal,
    /// gross_payout - stake
    pub net_profit: Decimal,
    /// Net profit as a percentage of the stake (0 for a zero stake)
    pub roi: Decimal,
}

/// Estimate the payout of staking `stake` tokens on `option_id`.
///
/// Uses the odds of the market BEFORE the stake is added, i.e. the price the
/// user locks in. A zero stake yields an all-zero estimate, never NaN.
pub fn calculate_payout(
    stake: u64,
    option_id: &str,
    market: &Market,
    policy: &OddsPolicy,
) -> Result<Payout, OddsError> {
    let option = market.require_option(option_id)?;
    let odds = option_odds(option.total_tokens, market.total_tokens(), policy).odds;

    let stake_tokens = Decimal::from(stake);
    let gross_payout = stake_tokens
        .checked_mul(odds)
        .ok_or(OddsError::PayoutOverflow { stake })?;
    let net_profit = gross_payout - stake_tokens;
    let roi = if stake == 0 {
        Decimal::ZERO
    } else {
        net_profit / stake_tokens * Decimal::ONE_HUNDRED
    };

    tracing::debug!(
        market_id = %market.id,
        option_id,
        stake,
        %odds,
        %gross_payout,
        "calculated payout"
    );

    Ok(Payout {
        stake,
        odds,
        gross_payout,
        net_profit,
        roi,
    })
}
