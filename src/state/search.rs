// Search state - debounce window and response sequencing
use std::time::{Duration, Instant};

use crate::api::types::SearchHit;

pub const DEBOUNCE: Duration = Duration::from_millis(300);
pub const MIN_QUERY_LEN: usize = 2;

/// Debounced search box. Every dispatched query gets a sequence number;
/// a response is applied only when it carries the number of the latest
/// dispatch, so a slow superseded request can never clobber newer
/// results.
pub struct SearchState {
    pub query: String,
    pending_since: Option<Instant>,
    next_seq: u64,
    sent_seq: Option<u64>,
    pub in_flight: bool,
    pub results: Option<SearchResults>,
    pub open: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub total: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            pending_since: None,
            next_seq: 0,
            sent_seq: None,
            in_flight: false,
            results: None,
            open: false,
        }
    }

    /// Call after the query text changed. Short queries clear results
    /// immediately and never reach the network.
    pub fn note_edited(&mut self, now: Instant) {
        if self.query.trim().chars().count() < MIN_QUERY_LEN {
            self.pending_since = None;
            self.sent_seq = None;
            self.in_flight = false;
            self.results = None;
            self.open = false;
        } else {
            self.pending_since = Some(now);
        }
    }

    /// Returns the query to dispatch once the debounce window elapsed.
    pub fn poll_due(&mut self, now: Instant) -> Option<(u64, String)> {
        let since = self.pending_since?;
        if now.duration_since(since) < DEBOUNCE {
            return None;
        }
        self.pending_since = None;
        self.next_seq += 1;
        self.sent_seq = Some(self.next_seq);
        self.in_flight = true;
        Some((self.next_seq, self.query.trim().to_string()))
    }

    /// Time left until the pending query fires, if one is pending.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        let since = self.pending_since?;
        Some(DEBOUNCE.saturating_sub(now.duration_since(since)))
    }

    /// Apply a response; stale sequence numbers are discarded.
    pub fn apply(&mut self, seq: u64, hits: Vec<SearchHit>, total: u64) -> bool {
        if self.sent_seq != Some(seq) {
            return false;
        }
        self.in_flight = false;
        self.results = Some(SearchResults { hits, total });
        self.open = true;
        true
    }

    pub fn fail(&mut self, seq: u64) {
        if self.sent_seq == Some(seq) {
            self.in_flight = false;
        }
    }

    pub fn dismiss(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(name: &str) -> SearchHit {
        SearchHit {
            id: 1,
            full_name: name.to_string(),
            login: String::new(),
            is_elder: false,
            is_active: true,
            path: String::new(),
        }
    }

    #[test]
    fn test_short_query_clears_without_dispatch() {
        let now = Instant::now();
        let mut search = SearchState::new();
        search.query = "a".into();
        search.note_edited(now);
        assert!(search.poll_due(now + DEBOUNCE * 2).is_none());
        assert!(search.results.is_none());
    }

    #[test]
    fn test_rapid_edits_collapse_to_one_dispatch() {
        let now = Instant::now();
        let mut search = SearchState::new();

        search.query = "a".into();
        search.note_edited(now);
        search.query = "ab".into();
        search.note_edited(now + Duration::from_millis(100));

        // Still inside the debounce window of the second edit.
        assert!(search.poll_due(now + Duration::from_millis(250)).is_none());

        let (seq, query) = search
            .poll_due(now + Duration::from_millis(450))
            .expect("debounced query should fire");
        assert_eq!(query, "ab");

        // Nothing further to dispatch.
        assert!(search.poll_due(now + Duration::from_secs(2)).is_none());
        assert_eq!(seq, 1);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let now = Instant::now();
        let mut search = SearchState::new();

        search.query = "ив".into();
        search.note_edited(now);
        let (first, _) = search.poll_due(now + DEBOUNCE).unwrap();

        search.query = "иван".into();
        search.note_edited(now + DEBOUNCE);
        let (second, _) = search.poll_due(now + DEBOUNCE * 2).unwrap();

        // The superseded response arrives late and must not render.
        assert!(!search.apply(first, vec![hit("stale")], 1));
        assert!(search.results.is_none());

        assert!(search.apply(second, vec![hit("fresh")], 1));
        assert_eq!(search.results.as_ref().unwrap().hits[0].full_name, "fresh");

        // Even later stale responses stay discarded.
        assert!(!search.apply(first, vec![hit("stale")], 1));
        assert_eq!(search.results.as_ref().unwrap().hits[0].full_name, "fresh");
    }

    #[test]
    fn test_shrinking_query_invalidates_in_flight_request() {
        let now = Instant::now();
        let mut search = SearchState::new();

        search.query = "ab".into();
        search.note_edited(now);
        let (seq, _) = search.poll_due(now + DEBOUNCE).unwrap();
        assert!(search.in_flight);

        search.query = "a".into();
        search.note_edited(now + DEBOUNCE);
        assert!(!search.in_flight);
        assert!(!search.apply(seq, vec![hit("stale")], 1));
        assert!(search.results.is_none());
    }
}
