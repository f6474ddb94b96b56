/// One selectable outcome within a market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketOption {
    /// Option ID (e.g., "opt-yes")
    pub id: String,
    /// Display text shown to users
    pub text: String,
    /// Tokens committed to this option
    pub total_tokens: u64,
    /// Number of users backing this option
    pub participant_count: u64,
}

impl MarketOption {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        total_tokens: u64,
        participant_count: u64,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            total_tokens,
            participant_count,
        }
    }

    /// True if nobody has committed tokens to this option yet.
    pub fn is_unbacked(&self) -> bool {
        self.total_tokens == 0
    }
}
