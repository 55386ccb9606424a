//! Async task bookkeeping shared by the reducer and the runtime.
//!
//! Each spawned network call gets a `TaskId`. The reducer records the id of
//! the task it currently cares about per kind; a completion whose id no
//! longer matches is stale and gets dropped instead of overwriting fresh
//! state. Cancellation uses `CancellationToken` so in-flight requests can be
//! aborted on quit or when a newer request supersedes them.

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Events,
    Refresh,
    Stats,
}

/// Lifecycle state of one task kind (mutated only by the reducer).
#[derive(Debug, Default)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, id: TaskId, cancel: CancellationToken) {
        self.active = Some(id);
        self.cancel = Some(cancel);
    }

    /// Clears the task if `id` is still the active one. Returns false for
    /// stale completions.
    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }
}

#[derive(Debug, Default)]
pub struct Tasks {
    pub events: TaskState,
    pub refresh: TaskState,
    pub stats: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Events => &mut self.events,
            TaskKind::Refresh => &mut self.refresh,
            TaskKind::Stats => &mut self.stats,
        }
    }

    /// Tokens of every in-flight task, for cancellation on quit.
    pub fn cancel_tokens(&self) -> Vec<CancellationToken> {
        [&self.events, &self.refresh, &self.stats]
            .into_iter()
            .filter_map(|t| t.cancel.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_seq_is_monotonic() {
        let mut seq = TaskSeq::default();
        let a = seq.next_id();
        let b = seq.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_finish_if_active_rejects_stale_ids() {
        let mut state = TaskState::default();
        state.on_started(TaskId(1), CancellationToken::new());
        state.on_started(TaskId(2), CancellationToken::new());

        assert!(!state.finish_if_active(TaskId(1)));
        assert!(state.is_running());
        assert!(state.finish_if_active(TaskId(2)));
        assert!(!state.is_running());
    }

    #[test]
    fn test_cancel_tokens_collects_only_running_tasks() {
        let mut tasks = Tasks::default();
        assert!(tasks.cancel_tokens().is_empty());

        tasks
            .state_mut(TaskKind::Refresh)
            .on_started(TaskId(3), CancellationToken::new());
        assert_eq!(tasks.cancel_tokens().len(), 1);
    }
}
