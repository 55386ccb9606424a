//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer itself never
//! performs I/O or spawns tasks.

use tokio_util::sync::CancellationToken;

use crate::common::TaskId;
use crate::events::RefreshTrigger;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Fetch the full event collection.
    FetchEvents { task: TaskId },

    /// Trigger a server-side refresh.
    TriggerRefresh {
        task: TaskId,
        trigger: RefreshTrigger,
    },

    /// Fetch aggregate stats; `announce` requests a success notification.
    FetchStats { task: TaskId, announce: bool },

    /// Cancel an in-flight task.
    CancelTask { token: CancellationToken },
}
