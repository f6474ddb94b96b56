mod market;
mod option;

pub use market::{Market, MarketStatus};
pub use option::MarketOption;
