use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{CommitmentError, MarketError};
use crate::odds::{calculate_payout, preview_odds_impact, OddsImpact, OddsPolicy, Payout};
use crate::state::Market;

/// Stake limits applied before a commitment is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommitmentLimits {
    /// Smallest accepted stake in tokens
    pub min_stake: u64,
    /// Largest accepted stake in tokens (None = only bounded by balance)
    pub max_stake: Option<u64>,
}

impl Default for CommitmentLimits {
    fn default() -> Self {
        Self {
            min_stake: 1,
            max_stake: None,
        }
    }
}

/// A user's proposed commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitmentRequest {
    pub option_id: String,
    /// Tokens to commit
    pub stake: u64,
    /// Tokens currently in the user's wallet
    pub balance: u64,
}

impl CommitmentRequest {
    pub fn new(option_id: impl Into<String>, stake: u64, balance: u64) -> Self {
        Self {
            option_id: option_id.into(),
            stake,
            balance,
        }
    }
}

/// An accepted commitment with its price and effect on the market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitmentQuote {
    pub market_id: String,
    pub option_id: String,
    pub stake: u64,
    pub payout: Payout,
    pub impact: OddsImpact,
    /// Wallet balance once the stake is deducted
    pub remaining_balance: u64,
}

/// Validate a commitment and quote it.
///
/// # Checks (in order)
/// 1. Market is active
/// 2. Market hasn't passed `ends_at`
/// 3. Option exists
/// 4. Stake is non-zero and within `limits`
/// 5. Stake fits in the balance
pub fn validate_commitment(
    market: &Market,
    request: &CommitmentRequest,
    limits: &CommitmentLimits,
    policy: &OddsPolicy,
    now: DateTime<Utc>,
) -> Result<CommitmentQuote, CommitmentError> {
    if !market.status.accepts_commitments() {
        return Err(CommitmentError::MarketNotActive {
            market_id: market.id.clone(),
            status: market.status.to_string(),
        });
    }
    if market.has_ended(now) {
        return Err(CommitmentError::MarketExpired {
            market_id: market.id.clone(),
        });
    }

    market.require_option(&request.option_id)?;

    let stake = request.stake;
    if stake == 0 {
        return Err(CommitmentError::ZeroStake);
    }
    if stake < limits.min_stake {
        return Err(CommitmentError::BelowMinimum {
            stake,
            min: limits.min_stake,
        });
    }
    if let Some(max) = limits.max_stake {
        if stake > max {
            return Err(CommitmentError::AboveMaximum { stake, max });
        }
    }
    let remaining_balance = request
        .balance
        .checked_sub(stake)
        .ok_or(CommitmentError::InsufficientBalance {
            stake,
            balance: request.balance,
        })?;

    let payout = calculate_payout(stake, &request.option_id, market, policy)?;
    let impact = preview_odds_impact(stake, &request.option_id, market, policy)?;

    tracing::info!(
        market_id = %market.id,
        option_id = %request.option_id,
        stake,
        impact = %impact.level,
        "commitment accepted"
    );

    Ok(CommitmentQuote {
        market_id: market.id.clone(),
        option_id: request.option_id.clone(),
        stake,
        payout,
        impact,
        remaining_balance,
    })
}

/// Market snapshot after a quoted commitment lands.
///
/// Used to show the new pool before the backend confirms; the caller swaps in
/// the authoritative snapshot when it arrives.
pub fn apply_commitment(
    market: &Market,
    quote: &CommitmentQuote,
    first_time_backer: bool,
) -> Result<Market, MarketError> {
    market.with_commitment(&quote.option_id, quote.stake, first_time_backer)
}
