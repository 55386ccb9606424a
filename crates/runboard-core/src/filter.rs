//! Event filtering and the query-string locator.
//!
//! The filter state round-trips through a query string (`type`, `seed`) so a
//! view can be reproduced from a saved locator or CLI arguments. Empty fields
//! and absent parameters are the same thing.

use crate::event::Event;

/// Active filters. Empty string means "no filter" for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub event_type: String,
    pub seed: String,
}

impl FilterState {
    pub fn new(event_type: impl Into<String>, seed: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            seed: seed.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.event_type.is_empty() && self.seed.is_empty()
    }

    /// Whether a single event passes both predicates.
    pub fn matches(&self, event: &Event) -> bool {
        if !self.event_type.is_empty() && event.event_type.as_deref() != Some(&*self.event_type) {
            return false;
        }
        if !self.seed.is_empty() && !self.seed_matches(event) {
            return false;
        }
        true
    }

    /// Seed matching is deliberately loose: the filter text must parse as an
    /// integer equal to the event's numeric seed. Non-numeric input never
    /// matches anything.
    fn seed_matches(&self, event: &Event) -> bool {
        let Ok(wanted) = self.seed.trim().parse::<i64>() else {
            return false;
        };
        event.game_data.as_ref().and_then(|g| g.seed) == Some(wanted)
    }

    /// Filters `events` and sorts the result newest-first. The sort is stable,
    /// so ties keep their original fetch order.
    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        let mut filtered: Vec<Event> = events.iter().filter(|e| self.matches(e)).cloned().collect();
        filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        filtered
    }

    /// Encodes exactly the non-empty fields as `type=...&seed=...`.
    pub fn to_query(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if !self.event_type.is_empty() {
            serializer.append_pair("type", &self.event_type);
        }
        if !self.seed.is_empty() {
            serializer.append_pair("seed", &self.seed);
        }
        serializer.finish()
    }

    /// Parses a query string back into a filter. Unknown parameters are
    /// ignored; missing parameters leave the field empty.
    pub fn from_query(query: &str) -> Self {
        let mut filter = FilterState::default();
        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "type" => filter.event_type = value.into_owned(),
                "seed" => filter.seed = value.into_owned(),
                _ => {}
            }
        }
        filter
    }
}
