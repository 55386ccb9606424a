//! Async effect handlers.
//!
//! Each handler performs one network call and converts the outcome into a
//! `UiEvent` for the inbox. Handlers race their work against the task's
//! cancellation token; a cancelled task produces no event at all, so it can
//! never overwrite newer state.

use runboard_core::client::ApiClient;
use tokio_util::sync::CancellationToken;

use crate::common::TaskId;
use crate::events::{RefreshTrigger, UiEvent};

pub async fn load_events(
    client: ApiClient,
    task: TaskId,
    token: CancellationToken,
) -> Option<UiEvent> {
    tokio::select! {
        () = token.cancelled() => None,
        result = client.fetch_events() => Some(UiEvent::EventsLoaded { task, result }),
    }
}

pub async fn trigger_refresh(
    client: ApiClient,
    task: TaskId,
    trigger: RefreshTrigger,
    token: CancellationToken,
) -> Option<UiEvent> {
    tokio::select! {
        () = token.cancelled() => None,
        result = client.trigger_refresh() => Some(UiEvent::RefreshCompleted { task, trigger, result }),
    }
}

pub async fn load_stats(
    client: ApiClient,
    task: TaskId,
    announce: bool,
    token: CancellationToken,
) -> Option<UiEvent> {
    tokio::select! {
        () = token.cancelled() => None,
        result = client.fetch_stats() => Some(UiEvent::StatsLoaded { task, announce, result }),
    }
}
