use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{MarketError, SnapshotError};
use crate::state::{Market, MarketOption, MarketStatus};

/// Market document as served by the KAI backend.
#[derive(Debug, Deserialize)]
pub struct MarketSnapshot {
    pub id: String,

    pub title: String,

    pub status: MarketStatus,

    pub options: Vec<OptionSnapshot>,

    #[serde(rename = "totalParticipants", default)]
    pub total_participants: Option<u64>,

    /// Backend's running total; eventually consistent with the options
    #[serde(rename = "totalTokens", default)]
    pub total_tokens: Option<u64>,

    #[serde(rename = "endsAt", default)]
    pub ends_at: Option<DateTime<Utc>>,
}

/// One option inside a market document.
#[derive(Debug, Deserialize)]
pub struct OptionSnapshot {
    pub id: String,

    pub text: String,

    #[serde(rename = "totalTokens", default)]
    pub total_tokens: u64,

    #[serde(rename = "participantCount", default)]
    pub participant_count: u64,
}

impl MarketSnapshot {
    /// Validate the document into a `Market`.
    ///
    /// The option totals are authoritative. A stated `totalTokens` that
    /// disagrees with them is logged and dropped.
    pub fn into_market(self) -> Result<Market, MarketError> {
        let options = self
            .options
            .into_iter()
            .map(|o| MarketOption::new(o.id, o.text, o.total_tokens, o.participant_count))
            .collect();

        let mut market = Market::try_new(self.id, self.title, self.status, options)?;

        if let Some(stated) = self.total_tokens {
            if stated != market.total_tokens() {
                tracing::warn!(
                    market_id = %market.id,
                    stated,
                    summed = market.total_tokens(),
                    "snapshot total disagrees with options, using option sum"
                );
            }
        }
        if let Some(participants) = self.total_participants {
            market = market.with_participants(participants);
        }
        if let Some(ends_at) = self.ends_at {
            market = market.with_ends_at(ends_at);
        }

        Ok(market)
    }
}

/// Parse a market document from JSON.
pub fn parse_snapshot(json: &str) -> Result<Market, SnapshotError> {
    let snapshot: MarketSnapshot = serde_json::from_str(json).map_err(SnapshotError::Parse)?;
    Ok(snapshot.into_market()?)
}

/// Load a market document from a JSON file.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Market, SnapshotError> {
    let contents = fs::read_to_string(path).map_err(SnapshotError::ReadFile)?;
    let market = parse_snapshot(&contents)?;
    tracing::debug!(
        market_id = %market.id,
        options = market.options().len(),
        total_tokens = market.total_tokens(),
        "loaded market snapshot"
    );
    Ok(market)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "id": "mkt-trending-12",
        "title": "Will the new phone ship on time?",
        "status": "active",
        "options": [
            { "id": "yes", "text": "On time", "totalTokens": 600, "participantCount": 14 },
            { "id": "no", "text": "Delayed", "totalTokens": 400, "participantCount": 9 }
        ],
        "totalParticipants": 21,
        "totalTokens": 1000,
        "endsAt": "2026-11-01T00:00:00Z"
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let market = parse_snapshot(SNAPSHOT).unwrap();

        assert_eq!(market.id, "mkt-trending-12");
        assert_eq!(market.status, MarketStatus::Active);
        assert_eq!(market.total_tokens(), 1000);
        // Backend figure wins over the per-option sum (some users back both)
        assert_eq!(market.total_participants, 21);
        assert_eq!(market.option("no").unwrap().text, "Delayed");
        assert_eq!(
            market.ends_at,
            Some(Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_counts_default_to_zero() {
        let market = parse_snapshot(
            r#"{
                "id": "mkt-new",
                "title": "Brand new",
                "status": "active",
                "options": [ { "id": "a", "text": "A" }, { "id": "b", "text": "B" } ]
            }"#,
        )
        .unwrap();

        assert_eq!(market.total_tokens(), 0);
        assert_eq!(market.total_participants, 0);
        assert_eq!(market.ends_at, None);
    }

    #[test]
    fn test_stale_total_is_reconciled() {
        let market = parse_snapshot(
            r#"{
                "id": "mkt-1",
                "title": "Stale",
                "status": "closed",
                "options": [ { "id": "a", "text": "A", "totalTokens": 30 } ],
                "totalTokens": 25
            }"#,
        )
        .unwrap();

        assert_eq!(market.total_tokens(), 30);
        assert_eq!(market.status, MarketStatus::Closed);
    }

    #[test]
    fn test_negative_tokens_rejected() {
        let result = parse_snapshot(
            r#"{
                "id": "mkt-1",
                "title": "Bad",
                "status": "active",
                "options": [ { "id": "a", "text": "A", "totalTokens": -5 } ]
            }"#,
        );
        assert!(matches!(result, Err(SnapshotError::Parse(_))));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = parse_snapshot(
            r#"{ "id": "m", "title": "t", "status": "paused", "options": [] }"#,
        );
        assert!(matches!(result, Err(SnapshotError::Parse(_))));
    }

    #[test]
    fn test_invalid_market_rejected() {
        let result = parse_snapshot(
            r#"{ "id": "m", "title": "t", "status": "active", "options": [] }"#,
        );
        assert!(matches!(
            result,
            Err(SnapshotError::Market(MarketError::EmptyOptions { .. }))
        ));
    }

    #[test]
    fn test_load_snapshot_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let market = load_snapshot(file.path()).unwrap();
        assert_eq!(market.options().len(), 2);
    }

    #[test]
    fn test_load_snapshot_missing_file() {
        let result = load_snapshot("/nonexistent/market.json");
        assert!(matches!(result, Err(SnapshotError::ReadFile(_))));
    }
}
