//! In-memory event store.
//!
//! Holds the last successfully fetched event set. The set is only ever
//! replaced wholesale, never mutated in place, so a failed fetch leaves the
//! previous view intact.

use std::collections::BTreeSet;

use crate::event::Event;

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a freshly fetched set.
    pub fn replace_all(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Looks an event up by identity.
    pub fn get(&self, event_id: &str) -> Option<&Event> {
        self.events
            .iter()
            .find(|e| e.event_id.as_deref() == Some(event_id))
    }

    /// Distinct event types, sorted. Used for filter suggestion cycling.
    pub fn event_types(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| e.event_type.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct seeds, sorted. Used for filter suggestion cycling.
    pub fn seeds(&self) -> Vec<i64> {
        self.events
            .iter()
            .filter_map(|e| e.game_data.as_ref().and_then(|g| g.seed))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn events_from_json(value: serde_json::Value) -> Vec<Event> {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> Vec<Event> {
        events_from_json(json!([
            {"event_id": "a", "event_type": "jump", "timestamp": 1, "game_data": {"seed": 7}},
            {"event_id": "b", "event_type": "land", "timestamp": 2, "game_data": {"seed": 3}},
            {"event_id": "c", "event_type": "jump", "timestamp": 3, "game_data": {"seed": 7}},
            {"event_type": "hit", "timestamp": 4}
        ]))
    }

    #[test]
    fn test_replace_all_swaps_the_set() {
        let mut store = EventStore::new();
        assert!(store.is_empty());

        store.replace_all(sample());
        assert_eq!(store.len(), 4);

        store.replace_all(Vec::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_finds_events_by_id() {
        let mut store = EventStore::new();
        store.replace_all(sample());
        assert_eq!(store.get("b").unwrap().display_type(), "land");
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_event_types_are_sorted_and_deduplicated() {
        let mut store = EventStore::new();
        store.replace_all(sample());
        assert_eq!(store.event_types(), vec!["hit", "jump", "land"]);
    }

    #[test]
    fn test_seeds_are_sorted_and_deduplicated() {
        let mut store = EventStore::new();
        store.replace_all(sample());
        assert_eq!(store.seeds(), vec![3, 7]);
    }
}
