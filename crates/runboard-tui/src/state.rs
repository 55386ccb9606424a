//! Application state for the dashboard.
//!
//! All state lives in one owned `AppState` passed to the reducer; derived
//! view data (filtered events, page bounds) is recomputed synchronously from
//! the full set whenever filters or data change.

use std::cell::Cell;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use runboard_core::config::Config;
use runboard_core::event::Event;
use runboard_core::filter::FilterState;
use runboard_core::page::{self, Pager, PER_PAGE};
use runboard_core::stats::Stats;
use runboard_core::store::EventStore;

use crate::common::{TaskSeq, Tasks};
use crate::events::RefreshTrigger;
use crate::notifications::NotificationQueue;

/// Which filter field the cursor is in, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    EventType,
    Seed,
}

/// Editing buffers for the filter bar. Buffers only become the applied
/// filter when the user confirms with Enter.
#[derive(Debug, Default)]
pub struct FilterInput {
    pub focus: Option<FilterField>,
    pub event_type: String,
    pub seed: String,
}

impl FilterInput {
    pub fn set_from(&mut self, filter: &FilterState) {
        self.event_type = filter.event_type.clone();
        self.seed = filter.seed.clone();
    }

    pub fn to_filter(&self) -> FilterState {
        FilterState::new(self.event_type.trim(), self.seed.trim())
    }

    pub fn focused_buffer_mut(&mut self) -> Option<&mut String> {
        match self.focus? {
            FilterField::EventType => Some(&mut self.event_type),
            FilterField::Seed => Some(&mut self.seed),
        }
    }
}

/// Paused/running state of the periodic refresh timer.
#[derive(Debug)]
pub struct AutoRefreshState {
    pub enabled: bool,
    /// Set while the terminal lacks focus; due ticks are skipped.
    pub paused: bool,
    pub period: Duration,
    /// Start of the current countdown.
    pub last: Instant,
}

impl AutoRefreshState {
    pub fn is_due(&self, now: Instant) -> bool {
        self.enabled && !self.paused && now.saturating_duration_since(self.last) >= self.period
    }
}

/// Combined dashboard state. Mutated only by the reducer.
pub struct AppState {
    pub config: Config,
    pub should_quit: bool,

    /// Full unfiltered event set.
    pub store: EventStore,
    /// Applied filter; the locator and filter bar derive from it.
    pub filter: FilterState,
    /// Filter bar editing state.
    pub filter_input: FilterInput,
    /// Filtered view, newest first.
    pub view: Vec<Event>,
    pub pager: Pager,
    /// Selected row within the current page.
    pub selected: usize,

    /// Open detail panel, if any.
    pub details: Option<Event>,
    pub detail_scroll: u16,

    pub notifications: NotificationQueue,
    pub stats: Option<Stats>,

    pub auto: AutoRefreshState,
    /// Set while a refresh round is in flight; `Manual` shows the busy label.
    pub refreshing: Option<RefreshTrigger>,
    /// True while the initial event fetch is in flight.
    pub loading: bool,
    /// Last event-fetch failure, rendered as an inline error row.
    pub load_error: Option<String>,

    pub task_seq: TaskSeq,
    pub tasks: Tasks,

    /// Table rect from the last render, for mouse click routing.
    pub table_area: Cell<Rect>,
}

impl AppState {
    pub fn new(config: Config, filter: FilterState, auto_refresh: bool) -> Self {
        let mut filter_input = FilterInput::default();
        filter_input.set_from(&filter);

        let auto = AutoRefreshState {
            enabled: auto_refresh && config.auto_refresh,
            paused: false,
            period: config.refresh_interval(),
            last: Instant::now(),
        };

        Self {
            config,
            should_quit: false,
            store: EventStore::new(),
            filter,
            filter_input,
            view: Vec::new(),
            pager: Pager::default(),
            selected: 0,
            details: None,
            detail_scroll: 0,
            notifications: NotificationQueue::default(),
            stats: None,
            auto,
            refreshing: None,
            loading: false,
            load_error: None,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            table_area: Cell::new(Rect::default()),
        }
    }

    /// Recomputes the filtered view from the full set and goes back to the
    /// first page. Called whenever the filter or the data changes.
    pub fn recompute_view(&mut self) {
        let view = self.filter.apply(self.store.events());
        self.view = view;
        self.pager.reset();
        self.selected = 0;
    }

    pub fn total_pages(&self) -> usize {
        page::total_pages(self.view.len(), PER_PAGE)
    }

    pub fn current_page_slice(&self) -> &[Event] {
        page::page_slice(&self.view, self.pager.current(), PER_PAGE)
    }

    /// The event under the cursor on the current page.
    pub fn selected_event(&self) -> Option<&Event> {
        self.current_page_slice().get(self.selected)
    }

    /// Shareable locator for the current filter (`/data?type=...&seed=...`).
    pub fn locator(&self) -> String {
        let query = self.filter.to_query();
        if query.is_empty() {
            "/data".to_string()
        } else {
            format!("/data?{query}")
        }
    }
}
