use thiserror::Error;

/// Market snapshot invariant violations and lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("market '{market_id}' has no options")]
    EmptyOptions { market_id: String },

    #[error("duplicate option '{option_id}' in market '{market_id}'")]
    DuplicateOption { market_id: String, option_id: String },

    #[error("unknown option '{option_id}' in market '{market_id}'")]
    UnknownOption { market_id: String, option_id: String },

    #[error("token total overflows in market '{market_id}'")]
    TokenOverflow { market_id: String },
}

/// Errors from the odds calculator.
///
/// Degenerate markets (no tokens yet) are not errors; they produce fallback
/// odds instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OddsError {
    #[error(transparent)]
    Market(#[from] MarketError),

    #[error("payout for a stake of {stake} tokens is out of range")]
    PayoutOverflow { stake: u64 },
}

/// Reasons a commitment is rejected before it is sent anywhere.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitmentError {
    #[error("market '{market_id}' is {status}, not accepting commitments")]
    MarketNotActive { market_id: String, status: String },

    #[error("market '{market_id}' has ended")]
    MarketExpired { market_id: String },

    #[error("stake must be greater than zero")]
    ZeroStake,

    #[error("stake {stake} is below the minimum of {min}")]
    BelowMinimum { stake: u64, min: u64 },

    #[error("stake {stake} is above the maximum of {max}")]
    AboveMaximum { stake: u64, max: u64 },

    #[error("stake {stake} exceeds balance of {balance}")]
    InsufficientBalance { stake: u64, balance: u64 },

    #[error(transparent)]
    Odds(#[from] OddsError),
}

impl From<MarketError> for CommitmentError {
    fn from(err: MarketError) -> Self {
        Self::Odds(OddsError::Market(err))
    }
}

/// Errors while reading a market snapshot document.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse snapshot: {0}")]
    Parse(#[source] serde_json::Error),

    #[error(transparent)]
    Market(#[from] MarketError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
