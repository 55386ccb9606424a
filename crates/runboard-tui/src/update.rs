//! Dashboard reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects; the reducer itself never performs I/O.

use std::time::Instant;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use tracing::{error, warn};

use crate::effects::UiEffect;
use crate::events::{RefreshTrigger, UiEvent};
use crate::notifications::Severity;
use crate::state::{AppState, FilterField};

/// The main reducer function.
pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => on_tick(state),
        UiEvent::Terminal(term) => on_terminal(state, term),
        UiEvent::TaskStarted { kind, id, cancel } => {
            state.tasks.state_mut(kind).on_started(id, cancel);
            vec![]
        }
        UiEvent::EventsLoaded { task, result } => on_events_loaded(state, task, result),
        UiEvent::RefreshCompleted {
            task,
            trigger,
            result,
        } => on_refresh_completed(state, task, trigger, result),
        UiEvent::StatsLoaded {
            task,
            announce,
            result,
        } => on_stats_loaded(state, task, announce, result),
    }
}

/// Effects for the initial load: fetch events and stats right away.
pub fn initial_effects(state: &mut AppState) -> Vec<UiEffect> {
    state.loading = true;
    let mut effects = Vec::new();
    start_events_fetch(state, &mut effects);
    start_stats_fetch(state, &mut effects, false);
    effects
}

// ============================================================================
// Timer / focus
// ============================================================================

fn on_tick(state: &mut AppState) -> Vec<UiEffect> {
    let now = Instant::now();
    state.notifications.prune(now);

    let mut effects = Vec::new();
    if state.auto.is_due(now) && !state.tasks.refresh.is_running() {
        start_refresh(state, &mut effects, RefreshTrigger::Automatic);
    }
    effects
}

fn on_terminal(state: &mut AppState, event: CrosstermEvent) -> Vec<UiEffect> {
    match event {
        CrosstermEvent::FocusLost => {
            state.auto.paused = true;
            vec![]
        }
        CrosstermEvent::FocusGained => {
            if state.auto.paused {
                state.auto.paused = false;
                // Resume the countdown instead of firing immediately.
                state.auto.last = Instant::now();
            }
            vec![]
        }
        CrosstermEvent::Key(key) => on_key(state, key),
        CrosstermEvent::Mouse(mouse) => on_mouse(state, mouse),
        _ => vec![],
    }
}

// ============================================================================
// Input
// ============================================================================

fn on_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return quit(state);
    }

    if state.details.is_some() {
        return on_details_key(state, key);
    }
    if state.filter_input.focus.is_some() {
        return on_filter_key(state, key);
    }
    on_table_key(state, key)
}

fn on_table_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('q') => quit(state),
        KeyCode::Char('r') => {
            // Trigger is disabled while a refresh is already in flight.
            if state.tasks.refresh.is_running() {
                return vec![];
            }
            let mut effects = Vec::new();
            start_refresh(state, &mut effects, RefreshTrigger::Manual);
            effects
        }
        KeyCode::Char('/') | KeyCode::Char('f') => {
            state.filter_input.focus = Some(FilterField::EventType);
            vec![]
        }
        KeyCode::Char('c') => {
            state.filter_input = Default::default();
            state.filter = Default::default();
            state.recompute_view();
            vec![]
        }
        KeyCode::Left | KeyCode::Char('p') => {
            if state.pager.prev() {
                state.selected = 0;
            }
            vec![]
        }
        KeyCode::Right | KeyCode::Char('n') => {
            let total = state.total_pages();
            if state.pager.next(total) {
                state.selected = 0;
            }
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.selected = state.selected.saturating_sub(1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let len = state.current_page_slice().len();
            if len > 0 && state.selected < len - 1 {
                state.selected += 1;
            }
            vec![]
        }
        KeyCode::Enter => {
            open_selected_details(state);
            vec![]
        }
        _ => vec![],
    }
}

fn on_details_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.details = None;
            state.detail_scroll = 0;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.detail_scroll = state.detail_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.detail_scroll = state.detail_scroll.saturating_add(1);
        }
        KeyCode::PageUp => {
            state.detail_scroll = state.detail_scroll.saturating_sub(10);
        }
        KeyCode::PageDown => {
            state.detail_scroll = state.detail_scroll.saturating_add(10);
        }
        KeyCode::Home => state.detail_scroll = 0,
        _ => {}
    }
    vec![]
}

fn on_filter_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => state.filter_input.focus = None,
        KeyCode::Tab | KeyCode::BackTab => {
            state.filter_input.focus = match state.filter_input.focus {
                Some(FilterField::EventType) => Some(FilterField::Seed),
                _ => Some(FilterField::EventType),
            };
        }
        KeyCode::Enter => apply_filter_input(state),
        KeyCode::Backspace => {
            if let Some(buffer) = state.filter_input.focused_buffer_mut() {
                buffer.pop();
            }
        }
        KeyCode::Up => cycle_suggestion(state, false),
        KeyCode::Down => cycle_suggestion(state, true),
        KeyCode::Char(c) => {
            if let Some(buffer) = state.filter_input.focused_buffer_mut() {
                buffer.push(c);
            }
        }
        _ => {}
    }
    vec![]
}

fn on_mouse(state: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    if state.details.is_some() || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return vec![];
    }

    let area = state.table_area.get();
    // Data rows start below the block border and the header row.
    let first_row = area.y.saturating_add(2);
    let within_x = mouse.column > area.x && mouse.column < area.x.saturating_add(area.width);
    if within_x && mouse.row >= first_row {
        let index = usize::from(mouse.row - first_row);
        if index < state.current_page_slice().len() {
            state.selected = index;
            open_selected_details(state);
        }
    }
    vec![]
}

// ============================================================================
// Async completions
// ============================================================================

fn on_events_loaded(
    state: &mut AppState,
    task: crate::common::TaskId,
    result: Result<Vec<runboard_core::event::Event>, runboard_core::client::ApiError>,
) -> Vec<UiEffect> {
    if !state.tasks.events.finish_if_active(task) {
        return vec![];
    }
    state.loading = false;
    match result {
        Ok(events) => {
            state.store.replace_all(events);
            state.load_error = None;
            state.recompute_view();
        }
        Err(err) => {
            error!(error = %err, "failed to load events");
            state.load_error = Some(err.to_string());
        }
    }
    vec![]
}

fn on_refresh_completed(
    state: &mut AppState,
    task: crate::common::TaskId,
    trigger: RefreshTrigger,
    result: Result<(), runboard_core::client::ApiError>,
) -> Vec<UiEffect> {
    if !state.tasks.refresh.finish_if_active(task) {
        return vec![];
    }
    state.refreshing = None;
    state.auto.last = Instant::now();

    let mut effects = Vec::new();
    match result {
        Ok(()) => {
            if trigger == RefreshTrigger::Manual {
                // Full-reload equivalent: client view state is discarded,
                // the filter survives the way URL parameters survive a reload.
                state.details = None;
                state.detail_scroll = 0;
            }
            start_events_fetch(state, &mut effects);
            start_stats_fetch(state, &mut effects, trigger == RefreshTrigger::Automatic);
        }
        Err(err) => match trigger {
            RefreshTrigger::Manual => {
                error!(error = %err, "manual refresh failed");
                state
                    .notifications
                    .push(format!("Failed to refresh data: {err}"), Severity::Error);
            }
            RefreshTrigger::Automatic => warn!(error = %err, "automatic refresh failed"),
        },
    }
    effects
}

fn on_stats_loaded(
    state: &mut AppState,
    task: crate::common::TaskId,
    announce: bool,
    result: Result<runboard_core::stats::Stats, runboard_core::client::ApiError>,
) -> Vec<UiEffect> {
    if !state.tasks.stats.finish_if_active(task) {
        return vec![];
    }
    match result {
        Ok(stats) => {
            state.stats = Some(stats);
            if announce {
                state
                    .notifications
                    .push("Data refreshed automatically", Severity::Success);
            }
        }
        Err(err) => warn!(error = %err, "failed to load stats"),
    }
    vec![]
}

// ============================================================================
// Helpers
// ============================================================================

fn quit(state: &mut AppState) -> Vec<UiEffect> {
    state.should_quit = true;
    state
        .tasks
        .cancel_tokens()
        .into_iter()
        .map(|token| UiEffect::CancelTask { token })
        .collect()
}

fn apply_filter_input(state: &mut AppState) {
    state.filter = state.filter_input.to_filter();
    state.filter_input.focus = None;
    state.recompute_view();
}

fn open_selected_details(state: &mut AppState) {
    let event = state.selected_event().cloned();
    if let Some(event) = event {
        state.details = Some(event);
        state.detail_scroll = 0;
    }
}

/// Cycles the focused filter field through the distinct values present in the
/// data, the way the original dropdowns offered them.
fn cycle_suggestion(state: &mut AppState, forward: bool) {
    let Some(field) = state.filter_input.focus else {
        return;
    };
    let options: Vec<String> = match field {
        FilterField::EventType => state.store.event_types(),
        FilterField::Seed => state.store.seeds().iter().map(ToString::to_string).collect(),
    };
    if options.is_empty() {
        return;
    }

    let buffer = match field {
        FilterField::EventType => &mut state.filter_input.event_type,
        FilterField::Seed => &mut state.filter_input.seed,
    };
    let position = options.iter().position(|option| option.as_str() == buffer.as_str());
    let next = match (position, forward) {
        (Some(i), true) => (i + 1) % options.len(),
        (Some(i), false) => (i + options.len() - 1) % options.len(),
        (None, true) => 0,
        (None, false) => options.len() - 1,
    };
    *buffer = options[next].clone();
}

fn start_events_fetch(state: &mut AppState, effects: &mut Vec<UiEffect>) {
    // A newer fetch supersedes any in-flight one.
    if let Some(token) = state.tasks.events.cancel.take() {
        effects.push(UiEffect::CancelTask { token });
    }
    let task = state.task_seq.next_id();
    effects.push(UiEffect::FetchEvents { task });
}

fn start_stats_fetch(state: &mut AppState, effects: &mut Vec<UiEffect>, announce: bool) {
    if let Some(token) = state.tasks.stats.cancel.take() {
        effects.push(UiEffect::CancelTask { token });
    }
    let task = state.task_seq.next_id();
    effects.push(UiEffect::FetchStats { task, announce });
}

fn start_refresh(state: &mut AppState, effects: &mut Vec<UiEffect>, trigger: RefreshTrigger) {
    state.refreshing = Some(trigger);
    state.auto.last = Instant::now();
    let task = state.task_seq.next_id();
    effects.push(UiEffect::TriggerRefresh { task, trigger });
}
