use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::MarketOption;
use crate::error::MarketError;

/// Lifecycle status reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketStatus {
    Active,
    Closed,
    Resolved,
    Cancelled,
}

impl MarketStatus {
    /// Only active markets take new commitments.
    pub fn accepts_commitments(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Resolved => "resolved",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market snapshot - a prediction question and the tokens staked on each option.
///
/// `total_tokens` is always the sum of the option totals. It is computed at
/// construction and kept in step by `with_stake` / `with_commitment`, which
/// return new snapshots instead of mutating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    /// Market ID (e.g., "mkt-42")
    pub id: String,
    /// Question shown to users
    pub title: String,
    pub status: MarketStatus,
    /// Distinct users with a commitment in this market
    pub total_participants: u64,
    /// When the market stops taking commitments, if scheduled
    pub ends_at: Option<DateTime<Utc>>,
    options: Vec<MarketOption>,
    total_tokens: u64,
}

impl Market {
    /// Build a market, validating the option list.
    ///
    /// `total_participants` starts as the sum of option participant counts;
    /// use `with_participants` to override it with the backend's figure.
    pub fn try_new(
        id: impl Into<String>,
        title: impl Into<String>,
        status: MarketStatus,
        options: Vec<MarketOption>,
    ) -> Result<Self, MarketError> {
        let id = id.into();

        if options.is_empty() {
            return Err(MarketError::EmptyOptions { market_id: id });
        }

        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(option.id.as_str()) {
                return Err(MarketError::DuplicateOption {
                    market_id: id,
                    option_id: option.id.clone(),
                });
            }
        }

        let total_tokens = checked_sum(options.iter().map(|o| o.total_tokens))
            .ok_or_else(|| MarketError::TokenOverflow { market_id: id.clone() })?;
        let total_participants = options
            .iter()
            .fold(0_u64, |acc, o| acc.saturating_add(o.participant_count));

        Ok(Self {
            id,
            title: title.into(),
            status,
            total_participants,
            ends_at: None,
            options,
            total_tokens,
        })
    }

    pub fn with_participants(mut self, total_participants: u64) -> Self {
        self.total_participants = total_participants;
        self
    }

    pub fn with_ends_at(mut self, ends_at: DateTime<Utc>) -> Self {
        self.ends_at = Some(ends_at);
        self
    }

    /// Options in display order.
    pub fn options(&self) -> &[MarketOption] {
        &self.options
    }

    /// Sum of tokens across all options.
    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// Look up an option by ID.
    pub fn option(&self, option_id: &str) -> Option<&MarketOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Look up an option, failing with `UnknownOption` if it doesn't exist.
    pub fn require_option(&self, option_id: &str) -> Result<&MarketOption, MarketError> {
        self.option(option_id)
            .ok_or_else(|| self.unknown_option(option_id))
    }

    /// Hypothetical snapshot with `stake` tokens added to one option.
    /// A zero stake returns an identical market.
    pub fn with_stake(&self, option_id: &str, stake: u64) -> Result<Market, MarketError> {
        self.with_commitment(option_id, stake, false)
    }

    /// Snapshot as it would look after a commitment lands.
    ///
    /// A first-time backer also bumps the option's participant count and the
    /// market's participant total.
    pub fn with_commitment(
        &self,
        option_id: &str,
        stake: u64,
        first_time_backer: bool,
    ) -> Result<Market, MarketError> {
        let index = self
            .options
            .iter()
            .position(|o| o.id == option_id)
            .ok_or_else(|| self.unknown_option(option_id))?;

        let overflow = || MarketError::TokenOverflow {
            market_id: self.id.clone(),
        };
        let total_tokens = self.total_tokens.checked_add(stake).ok_or_else(overflow)?;

        let mut next = self.clone();
        let option = &mut next.options[index];
        option.total_tokens = option.total_tokens.checked_add(stake).ok_or_else(overflow)?;
        next.total_tokens = total_tokens;

        if first_time_backer {
            option.participant_count = option.participant_count.saturating_add(1);
            next.total_participants = next.total_participants.saturating_add(1);
        }

        Ok(next)
    }

    /// Whether the market still accepts commitments at `now`.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.status.accepts_commitments() && !self.has_ended(now)
    }

    /// True once `ends_at` has passed. Unscheduled markets never end.
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.ends_at.is_some_and(|end| end <= now)
    }

    /// Time remaining until the market ends in seconds.
    /// Returns None if unscheduled, 0 if it has already ended.
    pub fn time_remaining_secs(&self, now: DateTime<Utc>) -> Option<i64> {
        self.ends_at
            .map(|end| (end - now).num_seconds().max(0))
    }

    fn unknown_option(&self, option_id: &str) -> MarketError {
        MarketError::UnknownOption {
            market_id: self.id.clone(),
            option_id: option_id.to_string(),
        }
    }
}

fn checked_sum(values: impl Iterator<Item = u64>) -> Option<u64> {
    values.fold(Some(0_u64), |acc, v| acc?.checked_add(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn two_option_market() -> Market {
        Market::try_new(
            "mkt-1",
            "Will it rain tomorrow?",
            MarketStatus::Active,
            vec![
                MarketOption::new("yes", "Yes", 600, 12),
                MarketOption::new("no", "No", 400, 8),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_try_new_sums_totals() {
        let market = two_option_market();
        assert_eq!(market.total_tokens(), 1000);
        assert_eq!(market.total_participants, 20);
        assert_eq!(market.options().len(), 2);
        assert_eq!(market.option("no").map(|o| o.total_tokens), Some(400));
    }

    #[test]
    fn test_try_new_rejects_empty_options() {
        let result = Market::try_new("mkt-1", "Empty", MarketStatus::Active, vec![]);
        assert!(matches!(result, Err(MarketError::EmptyOptions { .. })));
    }

    #[test]
    fn test_try_new_rejects_duplicate_options() {
        let result = Market::try_new(
            "mkt-1",
            "Dupes",
            MarketStatus::Active,
            vec![
                MarketOption::new("yes", "Yes", 1, 1),
                MarketOption::new("yes", "Also yes", 2, 1),
            ],
        );
        assert_eq!(
            result,
            Err(MarketError::DuplicateOption {
                market_id: "mkt-1".into(),
                option_id: "yes".into(),
            })
        );
    }

    #[test]
    fn test_try_new_rejects_overflowing_total() {
        let result = Market::try_new(
            "mkt-1",
            "Huge",
            MarketStatus::Active,
            vec![
                MarketOption::new("a", "A", u64::MAX, 1),
                MarketOption::new("b", "B", 1, 1),
            ],
        );
        assert!(matches!(result, Err(MarketError::TokenOverflow { .. })));
    }

    #[test]
    fn test_with_stake_is_pure() {
        let market = two_option_market();
        let staked = market.with_stake("yes", 100).unwrap();

        assert_eq!(staked.option("yes").unwrap().total_tokens, 700);
        assert_eq!(staked.total_tokens(), 1100);
        // Participants untouched for a hypothetical stake
        assert_eq!(staked.option("yes").unwrap().participant_count, 12);

        // Original unchanged
        assert_eq!(market.option("yes").unwrap().total_tokens, 600);
        assert_eq!(market.total_tokens(), 1000);
    }

    #[test]
    fn test_with_stake_zero_is_identity() {
        let market = two_option_market();
        assert_eq!(market.with_stake("no", 0).unwrap(), market);
    }

    #[test]
    fn test_with_stake_unknown_option() {
        let market = two_option_market();
        assert_eq!(
            market.with_stake("maybe", 10),
            Err(MarketError::UnknownOption {
                market_id: "mkt-1".into(),
                option_id: "maybe".into(),
            })
        );
    }

    #[test]
    fn test_with_stake_overflow() {
        let market = two_option_market();
        let result = market.with_stake("yes", u64::MAX);
        assert!(matches!(result, Err(MarketError::TokenOverflow { .. })));
    }

    #[test]
    fn test_with_commitment_first_time_backer() {
        let market = two_option_market();
        let next = market.with_commitment("no", 50, true).unwrap();

        assert_eq!(next.option("no").unwrap().total_tokens, 450);
        assert_eq!(next.option("no").unwrap().participant_count, 9);
        assert_eq!(next.total_participants, 21);

        // Returning backer adds tokens only
        let again = next.with_commitment("no", 50, false).unwrap();
        assert_eq!(again.option("no").unwrap().participant_count, 9);
        assert_eq!(again.total_tokens(), 1100);
    }

    #[test]
    fn test_is_open_and_time_remaining() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let market = two_option_market();

        // Unscheduled
        assert!(market.is_open(now));
        assert_eq!(market.time_remaining_secs(now), None);

        let scheduled = market.clone().with_ends_at(now + Duration::seconds(90));
        assert!(scheduled.is_open(now));
        assert_eq!(scheduled.time_remaining_secs(now), Some(90));

        // Past the end
        let later = now + Duration::seconds(120);
        assert!(!scheduled.is_open(later));
        assert_eq!(scheduled.time_remaining_secs(later), Some(0));

        let mut closed = market;
        closed.status = MarketStatus::Closed;
        assert!(!closed.is_open(now));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(MarketStatus::Resolved.to_string(), "resolved");
        assert!(MarketStatus::Active.accepts_commitments());
        assert!(!MarketStatus::Cancelled.accepts_commitments());
    }
}
