//! Explore view controller.
//!
//! Owns everything the explore screen shows: the search term, the records
//! received so far (in arrival order), loading and error state, and the card
//! currently on display. Each search gets a new generation; messages from any
//! other generation are ignored, so a slow superseded stream can never leak
//! records into the current results.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::app::ExploreMessage;
use crate::error::{ExploreError, ExploreResult, StreamError};
use crate::models::{sample_records, Species, SpeciesError};
use crate::sse::ReadSummary;

/// Handle for one search, passed to the session that runs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub location: String,
}

/// What the view should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    /// No search yet
    Idle,
    /// Waiting for (more) results
    Loading,
    /// Search finished with results
    Loaded,
    /// Search finished without results
    Empty,
    /// Search failed; carries the user-facing message
    Error(String),
}

/// Controller for the explore screen.
#[derive(Debug, Default)]
pub struct ExploreViewController {
    search_term: String,
    records: Vec<Value>,
    loading: bool,
    completed: bool,
    error: Option<StreamError>,
    current: usize,
    generation: u64,
    parse_failures: usize,
    showing_sample: bool,
    summary: Option<ReadSummary>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl ExploreViewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, discarding the previous results.
    ///
    /// Fails without touching current state when `term` is blank.
    pub fn begin_search(&mut self, term: &str) -> ExploreResult<SearchTicket> {
        let location = term.trim();
        if location.is_empty() {
            return Err(ExploreError::EmptyLocation);
        }

        self.generation += 1;
        self.reset_results();
        self.search_term = location.to_string();
        self.loading = true;
        self.started_at = Some(Utc::now());

        Ok(SearchTicket {
            generation: self.generation,
            location: self.search_term.clone(),
        })
    }

    /// Apply a message from a search task.
    ///
    /// Returns `false` (and changes nothing) when the message belongs to a
    /// superseded search or arrives after its search already ended.
    pub fn apply(&mut self, message: ExploreMessage) -> bool {
        if message.generation() != self.generation {
            tracing::debug!(
                stale = message.generation(),
                current = self.generation,
                "Dropping message from superseded search"
            );
            return false;
        }
        if !self.loading {
            return false;
        }

        match message {
            ExploreMessage::Record { record, .. } => {
                self.records.push(record);
            }
            ExploreMessage::ParseFailed { .. } => {
                self.parse_failures += 1;
            }
            ExploreMessage::Completed { summary, .. } => {
                self.loading = false;
                self.completed = true;
                self.summary = Some(summary);
                self.finished_at = Some(Utc::now());
            }
            ExploreMessage::Failed { error, .. } => {
                self.loading = false;
                self.error = Some(error);
                self.finished_at = Some(Utc::now());
            }
        }
        true
    }

    /// Stop showing the running search as loading and ignore anything it
    /// still sends. Records received so far are kept.
    pub fn cancel(&mut self) {
        if self.loading {
            self.generation += 1;
            self.loading = false;
            self.error = Some(StreamError::Cancelled);
            self.finished_at = Some(Utc::now());
        }
    }

    /// Replace the results with the bundled sample species.
    pub fn load_sample_data(&mut self) {
        self.generation += 1;
        self.reset_results();
        self.records = sample_records();
        self.completed = true;
        self.showing_sample = true;
    }

    pub fn status(&self) -> ViewStatus {
        if self.loading {
            ViewStatus::Loading
        } else if let Some(error) = &self.error {
            ViewStatus::Error(error.user_message())
        } else if self.completed && self.records.is_empty() {
            ViewStatus::Empty
        } else if !self.records.is_empty() {
            ViewStatus::Loaded
        } else {
            ViewStatus::Idle
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&StreamError> {
        self.error.as_ref()
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of frames dropped for invalid JSON in the current search.
    pub fn parse_failures(&self) -> usize {
        self.parse_failures
    }

    pub fn is_showing_sample(&self) -> bool {
        self.showing_sample
    }

    /// Reader counters of the last completed search.
    pub fn summary(&self) -> Option<ReadSummary> {
        self.summary
    }

    /// Wall time of the current search, once it has ended.
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        Some(self.finished_at? - self.started_at?)
    }

    // ----- pagination -----

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The record on display.
    pub fn current(&self) -> Option<&Value> {
        self.records.get(self.current)
    }

    /// The record on display, as a species.
    pub fn current_species(&self) -> Option<Result<Species, SpeciesError>> {
        self.current().map(Species::from_record)
    }

    /// Move to the next card. Returns whether the index moved.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.records.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous card. Returns whether the index moved.
    pub fn previous(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to card `index`. Out-of-range indices are rejected.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.records.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// One-based position label, e.g. `"2 / 5"`.
    pub fn page_label(&self) -> String {
        if self.records.is_empty() {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", self.current + 1, self.records.len())
        }
    }

    fn reset_results(&mut self) {
        self.records.clear();
        self.loading = false;
        self.completed = false;
        self.error = None;
        self.current = 0;
        self.parse_failures = 0;
        self.showing_sample = false;
        self.summary = None;
        self.started_at = None;
        self.finished_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sse::FrameParseError;
    use serde_json::json;

    fn record(generation: u64, value: Value) -> ExploreMessage {
        ExploreMessage::Record {
            generation,
            record: value,
        }
    }

    fn completed(generation: u64) -> ExploreMessage {
        ExploreMessage::Completed {
            generation,
            summary: ReadSummary::default(),
        }
    }

    #[test]
    fn test_initial_state() {
        let view = ExploreViewController::new();
        assert_eq!(view.status(), ViewStatus::Idle);
        assert_eq!(view.page_label(), "0 / 0");
        assert!(view.current().is_none());
    }

    #[test]
    fn test_blank_search_rejected() {
        let mut view = ExploreViewController::new();
        assert_eq!(view.begin_search("   "), Err(ExploreError::EmptyLocation));
        assert_eq!(view.generation(), 0);
        assert_eq!(view.status(), ViewStatus::Idle);
    }

    #[test]
    fn test_records_append_in_arrival_order() {
        let mut view = ExploreViewController::new();
        let ticket = view.begin_search(" Sundarbans ").unwrap();
        assert_eq!(ticket.location, "Sundarbans");
        assert_eq!(view.status(), ViewStatus::Loading);

        assert!(view.apply(record(ticket.generation, json!({"A": 1}))));
        assert!(view.apply(record(ticket.generation, json!({"B": 2}))));
        assert_eq!(view.status(), ViewStatus::Loading);
        assert!(view.apply(completed(ticket.generation)));

        assert_eq!(view.records(), &[json!({"A": 1}), json!({"B": 2})]);
        assert_eq!(view.status(), ViewStatus::Loaded);
        assert!(view.elapsed().is_some());
    }

    #[test]
    fn test_stale_generation_dropped() {
        let mut view = ExploreViewController::new();
        let first = view.begin_search("first").unwrap();
        assert!(view.apply(record(first.generation, json!({"old": 1}))));

        let second = view.begin_search("second").unwrap();
        assert!(view.is_empty());
        assert!(!view.apply(record(first.generation, json!({"old": 2}))));
        assert!(!view.apply(completed(first.generation)));
        assert_eq!(view.status(), ViewStatus::Loading);

        assert!(view.apply(record(second.generation, json!({"new": 1}))));
        assert_eq!(view.records(), &[json!({"new": 1})]);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let mut view = ExploreViewController::new();
        let ticket = view.begin_search("Antarctica").unwrap();
        view.apply(completed(ticket.generation));
        assert_eq!(view.status(), ViewStatus::Empty);
        assert!(view.error().is_none());
    }

    #[test]
    fn test_failure_keeps_records() {
        let mut view = ExploreViewController::new();
        let ticket = view.begin_search("Goa").unwrap();
        view.apply(record(ticket.generation, json!({"A": 1})));
        view.apply(ExploreMessage::Failed {
            generation: ticket.generation,
            error: StreamError::Connection {
                message: "reset".to_string(),
            },
        });

        assert_eq!(view.len(), 1);
        assert!(!view.is_loading());
        assert!(matches!(view.status(), ViewStatus::Error(_)));

        // Nothing more is accepted once the search has ended.
        assert!(!view.apply(record(ticket.generation, json!({"B": 2}))));
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_parse_failures_counted() {
        let mut view = ExploreViewController::new();
        let ticket = view.begin_search("Goa").unwrap();
        view.apply(ExploreMessage::ParseFailed {
            generation: ticket.generation,
            error: FrameParseError::new("{bad", "EOF"),
        });
        assert_eq!(view.parse_failures(), 1);
        assert!(view.is_empty());
    }

    #[test]
    fn test_cancel_ignores_late_messages() {
        let mut view = ExploreViewController::new();
        let ticket = view.begin_search("Goa").unwrap();
        view.apply(record(ticket.generation, json!({"A": 1})));
        view.cancel();

        assert!(!view.apply(record(ticket.generation, json!({"B": 2}))));
        assert_eq!(view.len(), 1);
        assert_eq!(
            view.status(),
            ViewStatus::Error("The search was cancelled.".to_string())
        );
    }

    #[test]
    fn test_pagination_saturates() {
        let mut view = ExploreViewController::new();
        let ticket = view.begin_search("Goa").unwrap();
        for i in 0..3 {
            view.apply(record(ticket.generation, json!({ format!("S{}", i): {} })));
        }

        assert_eq!(view.page_label(), "1 / 3");
        assert!(!view.previous());
        assert!(view.next());
        assert!(view.next());
        assert!(!view.next());
        assert_eq!(view.current_index(), 2);
        assert_eq!(view.page_label(), "3 / 3");
        assert!(view.previous());
        assert!(!view.select(3));
        assert!(view.select(0));
        assert_eq!(view.current(), Some(&json!({"S0": {}})));
    }

    #[test]
    fn test_sample_data_supersedes_running_search() {
        let mut view = ExploreViewController::new();
        let ticket = view.begin_search("Goa").unwrap();
        view.load_sample_data();

        assert!(view.is_showing_sample());
        assert_eq!(view.status(), ViewStatus::Loaded);
        assert_eq!(view.len(), 2);
        assert!(!view.apply(record(ticket.generation, json!({"late": 1}))));

        let species = view.current_species().unwrap().unwrap();
        assert_eq!(species.name, "Bengal Tiger");
    }
}
