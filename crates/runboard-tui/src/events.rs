//! UI event types.
//!
//! All inputs to the dashboard (terminal events, timer ticks, async results)
//! are converted to `UiEvent` before being processed by the reducer. Async
//! operations send their results to the runtime's inbox channel; the runtime
//! drains the inbox every loop iteration.

use crossterm::event::Event as CrosstermEvent;
use runboard_core::client::ApiError;
use runboard_core::event::Event;
use runboard_core::stats::Stats;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

/// What caused a refresh round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// The user pressed the refresh key.
    Manual,
    /// The periodic timer fired.
    Automatic,
}

/// Unified event enum for the dashboard.
#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (notification expiry, auto-refresh countdown).
    Tick,

    /// Terminal input event (key, mouse, focus, resize).
    Terminal(CrosstermEvent),

    /// The runtime spawned a task; the reducer records its id and token.
    TaskStarted {
        kind: TaskKind,
        id: TaskId,
        cancel: CancellationToken,
    },

    /// Event fetch finished.
    EventsLoaded {
        task: TaskId,
        result: Result<Vec<Event>, ApiError>,
    },

    /// Server-side refresh finished.
    RefreshCompleted {
        task: TaskId,
        trigger: RefreshTrigger,
        result: Result<(), ApiError>,
    },

    /// Stats fetch finished. `announce` asks for a success notification
    /// (set for automatic refresh rounds).
    StatsLoaded {
        task: TaskId,
        announce: bool,
        result: Result<Stats, ApiError>,
    },
}
