//! Detail panel content for a single event.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use runboard_core::event::{Event, GameData, NOT_AVAILABLE};
use serde_json::Value;

/// Builds the detail panel lines: basic info, game data (omitted when the
/// event has none), the free-form data grid (omitted when empty), and the
/// raw JSON dump.
pub fn detail_lines(event: &Event) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    push_section(&mut lines, "Basic Info");
    push_field(
        &mut lines,
        "ID",
        event
            .event_id
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    );
    push_field(&mut lines, "Type", event.display_type().to_string());
    push_field(&mut lines, "Timestamp", event.timestamp.to_string());
    push_field(
        &mut lines,
        "Processed",
        event
            .processed_timestamp
            .clone()
            .unwrap_or_else(|| "Not processed".to_string()),
    );

    if let Some(game) = &event.game_data {
        lines.push(Line::default());
        push_section(&mut lines, "Game Data");
        push_game_data(&mut lines, game);
    }

    if let Some(data) = &event.data {
        if !data.is_empty() {
            lines.push(Line::default());
            push_section(&mut lines, "Event Data");
            for (key, value) in data {
                push_field(&mut lines, key, scalar_text(value));
            }
        }
    }

    lines.push(Line::default());
    push_section(&mut lines, "Raw JSON");
    for json_line in event.to_pretty_json().lines() {
        lines.push(Line::from(Span::styled(
            json_line.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

fn push_game_data(lines: &mut Vec<Line<'static>>, game: &GameData) {
    let or_na = |value: Option<String>| value.unwrap_or_else(|| NOT_AVAILABLE.to_string());

    push_field(lines, "Seed", or_na(game.seed.map(|s| s.to_string())));
    push_field(
        lines,
        "Level",
        or_na(game.level.as_ref().map(ToString::to_string)),
    );
    push_field(lines, "Stage Type", or_na(game.stage_type.clone()));
    push_field(lines, "Room", or_na(game.room_id.clone()));
    push_field(lines, "Room Type", or_na(game.room_type.clone()));
    push_field(
        lines,
        "Frame",
        or_na(game.frame_count.map(|f| f.to_string())),
    );
}

fn push_section(lines: &mut Vec<Line<'static>>, title: &str) {
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
}

fn push_field(lines: &mut Vec<Line<'static>>, label: &str, value: String) {
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {label}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ]));
}

/// Renders a scalar JSON value without quoting strings.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn text_of(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn event(value: serde_json::Value) -> Event {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_event_renders_all_sections() {
        let lines = detail_lines(&event(json!({
            "event_id": "ev-1",
            "event_type": "jump",
            "timestamp": 99,
            "processed_timestamp": "2024-01-01T00:00:00",
            "game_data": {"seed": 42, "level": 2, "room_type": "boss"},
            "data": {"height": 3}
        })));

        let text = text_of(&lines);
        assert!(text.contains("Basic Info"));
        assert!(text.contains("ID: ev-1"));
        assert!(text.contains("Game Data"));
        assert!(text.contains("Seed: 42"));
        assert!(text.contains("Room Type: boss"));
        assert!(text.contains("Event Data"));
        assert!(text.contains("height: 3"));
        assert!(text.contains("Raw JSON"));
        assert!(text.contains("\"event_id\": \"ev-1\""));
    }

    #[test]
    fn test_missing_game_data_omits_the_section() {
        let lines = detail_lines(&event(json!({"event_id": "ev-2"})));
        let text = text_of(&lines);
        assert!(!text.contains("Game Data"));
        assert!(!text.contains("Event Data"));
        assert!(text.contains("Raw JSON"));
    }

    #[test]
    fn test_empty_data_map_omits_the_grid() {
        let lines = detail_lines(&event(json!({"data": {}})));
        assert!(!text_of(&lines).contains("Event Data"));
    }

    #[test]
    fn test_unprocessed_event_shows_fallback() {
        let lines = detail_lines(&event(json!({})));
        let text = text_of(&lines);
        assert!(text.contains("Processed: Not processed"));
        assert!(text.contains("Timestamp: 0"));
    }

    #[test]
    fn test_game_data_fields_fall_back_individually() {
        let lines = detail_lines(&event(json!({"game_data": {"seed": 7}})));
        let text = text_of(&lines);
        assert!(text.contains("Seed: 7"));
        assert!(text.contains("Level: N/A"));
        assert!(text.contains("Frame: N/A"));
    }

    #[test]
    fn test_string_data_values_are_unquoted() {
        let lines = detail_lines(&event(json!({"data": {"direction": "left"}})));
        assert!(text_of(&lines).contains("direction: left"));
    }
}
