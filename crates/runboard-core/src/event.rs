//! Telemetry event data model.
//!
//! Events are immutable once fetched; identity is `event_id`. Most fields are
//! optional on the wire, so display helpers provide the fallbacks the table
//! and detail views rely on.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder rendered for absent optional fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single telemetry event as returned by `GET /api/events`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Unix seconds; 0 when the producer did not stamp the event.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_data: Option<GameData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl Event {
    /// Display id, falling back to `Event N` where `position` is the event's
    /// 1-based position within the current page.
    pub fn display_id(&self, position: usize) -> String {
        match &self.event_id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => format!("Event {position}"),
        }
    }

    pub fn display_type(&self) -> &str {
        match &self.event_type {
            Some(ty) if !ty.is_empty() => ty,
            _ => "Unknown",
        }
    }

    pub fn seed_label(&self) -> String {
        self.game_data
            .as_ref()
            .and_then(|g| g.seed)
            .map_or_else(|| NOT_AVAILABLE.to_string(), |s| s.to_string())
    }

    pub fn level_label(&self) -> String {
        self.game_data
            .as_ref()
            .and_then(|g| g.level.as_ref())
            .map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
    }

    /// Compact JSON of the free-form `data` map, truncated to `max` characters
    /// with a `...` marker when longer.
    pub fn data_preview(&self, max: usize) -> String {
        let rendered = match &self.data {
            Some(map) => serde_json::to_string(map).unwrap_or_else(|_| "{}".to_string()),
            None => "{}".to_string(),
        };
        if rendered.chars().count() > max {
            let truncated: String = rendered.chars().take(max).collect();
            format!("{truncated}...")
        } else {
            rendered
        }
    }

    /// Pretty-printed JSON of the whole event, for the detail view.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Per-run game state attached to an event. Absence means "not applicable".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<LevelValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_count: Option<i64>,
}

/// Producers send the level either as a number or as a display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelValue {
    Number(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for LevelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelValue::Number(n) => write!(f, "{n}"),
            LevelValue::Float(x) => write!(f, "{x}"),
            LevelValue::Text(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn event_from_json(value: serde_json::Value) -> Event {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_deserialize_full_event() {
        let event = event_from_json(json!({
            "event_id": "ev-1",
            "event_type": "jump",
            "timestamp": 1700000000,
            "processed_timestamp": "2024-01-01T00:00:00",
            "game_data": {
                "seed": 42,
                "level": 3,
                "stage_type": "basement",
                "room_id": "12",
                "room_type": "boss",
                "frame_count": 8812
            },
            "data": {"height": 2, "direction": "left"}
        }));

        assert_eq!(event.event_id.as_deref(), Some("ev-1"));
        assert_eq!(event.display_type(), "jump");
        assert_eq!(event.timestamp, 1_700_000_000);
        assert_eq!(event.seed_label(), "42");
        assert_eq!(event.level_label(), "3");
    }

    #[test]
    fn test_deserialize_minimal_event_uses_fallbacks() {
        let event = event_from_json(json!({}));
        assert_eq!(event.display_id(3), "Event 3");
        assert_eq!(event.display_type(), "Unknown");
        assert_eq!(event.timestamp, 0);
        assert_eq!(event.seed_label(), NOT_AVAILABLE);
        assert_eq!(event.level_label(), NOT_AVAILABLE);
        assert_eq!(event.data_preview(50), "{}");
    }

    #[test]
    fn test_level_accepts_number_or_string() {
        let numeric = event_from_json(json!({"game_data": {"level": 2}}));
        assert_eq!(numeric.level_label(), "2");

        let text = event_from_json(json!({"game_data": {"level": "2.1"}}));
        assert_eq!(text.level_label(), "2.1");

        let float = event_from_json(json!({"game_data": {"level": 2.5}}));
        assert_eq!(float.level_label(), "2.5");
    }

    #[test]
    fn test_data_preview_truncates_long_payloads() {
        let event = event_from_json(json!({
            "data": {"k": "a".repeat(100)}
        }));
        let preview = event.data_preview(50);
        assert_eq!(preview.chars().count(), 53);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_data_preview_keeps_short_payloads_intact() {
        let event = event_from_json(json!({"data": {"k": 1}}));
        assert_eq!(event.data_preview(50), r#"{"k":1}"#);
    }

    #[test]
    fn test_pretty_json_includes_nested_game_data() {
        let event = event_from_json(json!({
            "event_id": "ev-9",
            "game_data": {"seed": 7}
        }));
        let dump = event.to_pretty_json();
        assert!(dump.contains("\"event_id\": \"ev-9\""));
        assert!(dump.contains("\"seed\": 7"));
    }
}
