//! Pari-mutuel odds for KAI markets.
//!
//! Everything here is a pure function of a market snapshot and a policy.
//! Values are `Decimal`, so a degenerate market yields fallback odds and 0%
//! rather than NaN.

mod calculator;
mod impact;
mod payout;
mod policy;

pub use calculator::{calculate_odds, OddsTable, OptionOdds};
pub use impact::{preview_odds_impact, ImpactLevel, OddsImpact};
pub use payout::{calculate_payout, Payout};
pub use policy::OddsPolicy;
