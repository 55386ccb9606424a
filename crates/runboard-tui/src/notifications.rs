//! Transient notification stack.
//!
//! Notifications display for a fixed window, then fade (rendered dimmed) for
//! half a second before being removed. Multiple notifications stack in push
//! order; there is no deduplication.

use std::time::{Duration, Instant};

/// How long a notification is shown at full intensity.
pub const DISPLAY_WINDOW: Duration = Duration::from_secs(5);
/// How long the fade-out lasts after the display window.
pub const FADE_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    created: Instant,
}

impl Notification {
    fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created)
    }

    pub fn is_fading(&self, now: Instant) -> bool {
        self.age(now) >= DISPLAY_WINDOW
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.age(now) >= DISPLAY_WINDOW + FADE_WINDOW
    }
}

#[derive(Debug, Default)]
pub struct NotificationQueue {
    items: Vec<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
        self.push_created(message, severity, Instant::now());
    }

    pub fn push_created(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        created: Instant,
    ) {
        self.items.push(Notification {
            message: message.into(),
            severity,
            created,
        });
    }

    /// Drops notifications whose display and fade windows have both elapsed.
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|n| !n.is_expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ago(secs_millis: (u64, u32)) -> Instant {
        let (secs, millis) = secs_millis;
        Instant::now()
            .checked_sub(Duration::from_secs(secs) + Duration::from_millis(u64::from(millis)))
            .unwrap()
    }

    #[test]
    fn test_fresh_notifications_survive_prune() {
        let mut queue = NotificationQueue::default();
        queue.push("saved", Severity::Success);
        queue.prune(Instant::now());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_expired_notifications_are_removed() {
        let mut queue = NotificationQueue::default();
        queue.push_created("old", Severity::Info, ago((6, 0)));
        queue.push_created("new", Severity::Info, ago((1, 0)));

        queue.prune(Instant::now());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next().unwrap().message, "new");
    }

    #[test]
    fn test_notification_fades_after_display_window() {
        let mut queue = NotificationQueue::default();
        queue.push_created("fading", Severity::Error, ago((5, 200)));

        let now = Instant::now();
        queue.prune(now);
        // Still present during the fade window, but marked as fading.
        assert_eq!(queue.len(), 1);
        assert!(queue.iter().next().unwrap().is_fading(now));
    }

    #[test]
    fn test_notifications_stack_in_push_order() {
        let mut queue = NotificationQueue::default();
        queue.push("first", Severity::Info);
        queue.push("second", Severity::Info);
        queue.push("second", Severity::Info); // duplicates allowed

        let messages: Vec<&str> = queue.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "second"]);
    }
}
