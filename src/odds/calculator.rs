use rust_decimal::Decimal;

use super::OddsPolicy;
use crate::state::Market;

/// Odds and pool share for one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionOdds {
    /// Decimal (European) odds: payout multiplier on the stake
    pub odds: Decimal,
    /// Share of the pool backing this option (0-100)
    pub percentage: Decimal,
}

/// Odds for every option of a market, in the market's option order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OddsTable {
    entries: Vec<(String, OptionOdds)>,
}

impl OddsTable {
    pub fn get(&self, option_id: &str) -> Option<&OptionOdds> {
        self.entries
            .iter()
            .find(|(id, _)| id == option_id)
            .map(|(_, odds)| odds)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionOdds)> {
        self.entries.iter().map(|(id, odds)| (id.as_str(), odds))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all option percentages. 100 for any market with tokens, 0 otherwise.
    pub fn total_percentage(&self) -> Decimal {
        self.entries.iter().map(|(_, odds)| odds.percentage).sum()
    }
}

/// Calculate pari-mutuel odds for every option.
///
/// For a backed option:
///   odds       = total_tokens / option_tokens
///   percentage = option_tokens / total_tokens * 100
///
/// An option with no tokens (or a market with none at all) gets
/// `policy.fallback_odds` and 0%.
pub fn calculate_odds(market: &Market, policy: &OddsPolicy) -> OddsTable {
    let total = market.total_tokens();
    let entries = market
        .options()
        .iter()
        .map(|option| (option.id.clone(), option_odds(option.total_tokens, total, policy)))
        .collect();

    OddsTable { entries }
}

/// Odds for a single option given its tokens and the pool total.
pub(crate) fn option_odds(option_tokens: u64, total_tokens: u64, policy: &OddsPolicy) -> OptionOdds {
    if option_tokens == 0 || total_tokens == 0 {
        return OptionOdds {
            odds: policy.fallback_odds,
            percentage: Decimal::ZERO,
        };
    }

    let option = Decimal::from(option_tokens);
    let total = Decimal::from(total_tokens);

    OptionOdds {
        odds: total / option,
        percentage: option / total * Decimal::ONE_HUNDRED,
    }
}
