//! Aggregate statistics returned by `GET /api/stats`.

use serde::{Deserialize, Serialize};

/// Server-computed aggregates over the whole event set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total: u64,
    /// ISO-8601 timestamp of the last data update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_update: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeCount>,
    #[serde(default)]
    pub seeds: Vec<SeedSummary>,
}

impl Stats {
    /// The top `n` event types (the server sends them ordered by count).
    pub fn top_types(&self, n: usize) -> &[TypeCount] {
        &self.types[..self.types.len().min(n)]
    }

    /// The `n` most recent games.
    pub fn recent_games(&self, n: usize) -> &[SeedSummary] {
        &self.seeds[..self.seeds.len().min(n)]
    }

    /// `latest_update` formatted as `YYYY-MM-DD HH:MM:SS`, if present.
    pub fn formatted_update(&self) -> Option<String> {
        self.latest_update.as_deref().map(format_update_timestamp)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub event_type: String,
    pub count: u64,
    #[serde(default)]
    pub percentage: f64,
}

/// Per-game (per-seed) summary used for the recent-games cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSummary {
    pub seed: i64,
    pub count: u64,
    /// `[type, count]` pairs, most frequent first.
    #[serde(default)]
    pub types: Vec<(String, u64)>,
}

/// Formats an ISO-8601 timestamp as `YYYY-MM-DD HH:MM:SS`, dropping
/// sub-second precision. Falls back to a raw `T` split for strings chrono
/// cannot parse, and to the input itself as a last resort.
pub fn format_update_timestamp(raw: &str) -> String {
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    match raw.split_once('T') {
        Some((date, time)) => {
            let time: String = time.chars().take(8).collect();
            format!("{date} {time}")
        }
        None => raw.to_string(),
    }
}
