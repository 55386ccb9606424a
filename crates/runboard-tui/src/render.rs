//! Pure view functions for the dashboard.
//!
//! Functions here take `&AppState`, draw to a ratatui frame, and never mutate
//! state or return effects. The one exception to "never mutate" is the table
//! rect cache used for mouse click routing, which is interior-mutable.

use std::time::Instant;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use ratatui::Frame;
use runboard_core::event::Event;
use runboard_core::stats::Stats;

use crate::details::detail_lines;
use crate::events::RefreshTrigger;
use crate::notifications::Severity;
use crate::state::{AppState, FilterField};

/// Maximum characters of the free-form data map shown in the table.
const DATA_PREVIEW_LEN: usize = 50;
/// Width of a notification entry.
const NOTIFICATION_WIDTH: u16 = 44;

/// Renders the entire dashboard to the frame.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::vertical([
        Constraint::Length(5), // stats strip
        Constraint::Length(3), // filter bar
        Constraint::Min(5),    // event table
        Constraint::Length(1), // status line
    ])
    .split(area);

    render_stats(state, frame, chunks[0]);
    render_filter_bar(state, frame, chunks[1]);
    render_table(state, frame, chunks[2]);
    render_status_line(state, frame, chunks[3]);

    if let Some(event) = &state.details {
        render_details(event, state.detail_scroll, frame, area);
    }
    render_notifications(state, frame, area);
}

fn render_stats(state: &AppState, frame: &mut Frame, area: Rect) {
    let mut lines = Vec::with_capacity(3);

    let total = state
        .stats
        .as_ref()
        .map_or_else(|| state.store.len() as u64, |s| s.total);
    let updated = state
        .stats
        .as_ref()
        .and_then(Stats::formatted_update)
        .unwrap_or_else(|| "-".to_string());
    let mut overview = vec![
        Span::styled("Events: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(total.to_string()),
        Span::raw("   "),
        Span::styled(
            "Last updated: ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(updated),
    ];
    if state.refreshing == Some(RefreshTrigger::Manual) {
        overview.push(Span::styled(
            "   Refreshing...",
            Style::default().fg(Color::Yellow),
        ));
    }
    lines.push(Line::from(overview));

    lines.push(Line::from(top_types_line(state.stats.as_ref())));
    lines.push(Line::from(recent_games_line(state.stats.as_ref())));

    let block = Block::default().borders(Borders::ALL).title("runboard");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn top_types_line(stats: Option<&Stats>) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(
        "Top types: ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    match stats {
        Some(stats) if !stats.types.is_empty() => {
            let rendered: Vec<String> = stats
                .top_types(5)
                .iter()
                .map(|t| format!("{}: {} ({:.1}%)", t.event_type, t.count, t.percentage))
                .collect();
            spans.push(Span::raw(rendered.join(" | ")));
        }
        _ => spans.push(Span::raw("-")),
    }
    spans
}

fn recent_games_line(stats: Option<&Stats>) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(
        "Recent games: ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    match stats {
        Some(stats) if !stats.seeds.is_empty() => {
            let rendered: Vec<String> = stats
                .recent_games(3)
                .iter()
                .map(|game| {
                    let types: Vec<String> = game
                        .types
                        .iter()
                        .take(3)
                        .map(|(ty, count)| format!("{ty} x{count}"))
                        .collect();
                    let breakdown = if types.is_empty() {
                        String::new()
                    } else {
                        format!(", {}", types.join(", "))
                    };
                    format!("Seed {} ({} events{breakdown})", game.seed, game.count)
                })
                .collect();
            spans.push(Span::raw(rendered.join(" | ")));
        }
        _ => spans.push(Span::raw("-")),
    }
    spans
}

fn render_filter_bar(state: &AppState, frame: &mut Frame, area: Rect) {
    let input = &state.filter_input;
    let field_style = |field: FilterField| {
        if input.focus == Some(field) {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        }
    };
    let buffer_or_any = |buffer: &str| {
        if buffer.is_empty() {
            "(any)".to_string()
        } else {
            buffer.to_string()
        }
    };

    let line = Line::from(vec![
        Span::styled("Type: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            buffer_or_any(&input.event_type),
            field_style(FilterField::EventType),
        ),
        Span::raw("   "),
        Span::styled("Seed: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(buffer_or_any(&input.seed), field_style(FilterField::Seed)),
    ]);

    let title = if input.focus.is_some() {
        "Filters (Tab switch | Up/Down suggest | Enter apply | Esc done)"
    } else {
        "Filters (/ edit | c clear)"
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_table(state: &AppState, frame: &mut Frame, area: Rect) {
    state.table_area.set(area);

    let title = format!(
        "Events - page {}/{}",
        state.pager.current(),
        state.total_pages()
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if let Some(error) = &state.load_error {
        let message = Paragraph::new(Line::from(Span::styled(
            format!("Failed to load events: {error}"),
            Style::default().fg(Color::Red),
        )))
        .wrap(Wrap { trim: false })
        .block(block);
        frame.render_widget(message, area);
        return;
    }

    if state.loading && state.store.is_empty() {
        frame.render_widget(
            Paragraph::new("Loading events...").block(block),
            area,
        );
        return;
    }

    let page = state.current_page_slice();
    if page.is_empty() {
        frame.render_widget(
            Paragraph::new("No events match the current filters.").block(block),
            area,
        );
        return;
    }

    let header = Row::new(["ID", "Type", "Timestamp", "Seed", "Level", "Data"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = page.iter().enumerate().map(|(i, event)| {
        let row = Row::new(vec![
            Cell::from(event.display_id(i + 1)),
            Cell::from(event.display_type().to_string()),
            Cell::from(event.timestamp.to_string()),
            Cell::from(event.seed_label()),
            Cell::from(event.level_label()),
            Cell::from(event.data_preview(DATA_PREVIEW_LEN)),
        ]);
        if i == state.selected {
            row.style(Style::default().add_modifier(Modifier::REVERSED))
        } else {
            row
        }
    });

    let widths = [
        Constraint::Length(22),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn render_status_line(state: &AppState, frame: &mut Frame, area: Rect) {
    let auto = if !state.auto.enabled {
        "off"
    } else if state.auto.paused {
        "paused"
    } else {
        "on"
    };
    let line = Line::from(vec![
        Span::styled(
            "q quit | r refresh | / filter | Left/Right page | Enter details",
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::raw(format!(
            "{} of {} events | {} | auto-refresh: {auto}",
            state.view.len(),
            state.store.len(),
            state.locator(),
        )),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_details(event: &Event, scroll: u16, frame: &mut Frame, area: Rect) {
    let overlay = centered_rect(area, 80, 80);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Event Details")
        .title_bottom("Esc close | Up/Down scroll");
    let paragraph = Paragraph::new(detail_lines(event))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(block);
    frame.render_widget(paragraph, overlay);
}

fn render_notifications(state: &AppState, frame: &mut Frame, area: Rect) {
    if state.notifications.is_empty() {
        return;
    }

    let now = Instant::now();
    let width = NOTIFICATION_WIDTH.min(area.width.saturating_sub(2));
    let x = area.right().saturating_sub(width + 1);

    for (i, notification) in state.notifications.iter().enumerate() {
        let y = area.y + 1 + i as u16;
        if y >= area.bottom() {
            break;
        }
        let rect = Rect::new(x, y, width, 1);

        let (bg, fg) = match notification.severity {
            Severity::Info => (Color::Blue, Color::White),
            Severity::Success => (Color::Green, Color::Black),
            Severity::Error => (Color::Red, Color::White),
        };
        let mut style = Style::default().bg(bg).fg(fg);
        if notification.is_fading(now) {
            style = style.add_modifier(Modifier::DIM);
        }

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(notification.message.clone()).style(style),
            rect,
        );
    }
}

/// A rect centered in `area` taking the given percentages of each dimension.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);
    let horizontal = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1]);
    horizontal[1]
}
