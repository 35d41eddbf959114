// Navigation state - visit history and a cursor over it
use crate::model::Location;

/// Browser-style history: a fresh visit discards everything after the
/// cursor, back/forward only move the cursor.
pub struct NavigationHistory {
    stack: Vec<Location>,
    cursor: Option<usize>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            cursor: None,
        }
    }

    pub fn visit(&mut self, location: Location) {
        match self.cursor {
            Some(c) => self.stack.truncate(c + 1),
            None => self.stack.clear(),
        }
        self.stack.push(location);
        self.cursor = Some(self.stack.len() - 1);
    }

    pub fn go_back(&mut self) -> Option<&Location> {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.stack.get(c - 1)
            }
            _ => None,
        }
    }

    pub fn go_forward(&mut self) -> Option<&Location> {
        match self.cursor {
            Some(c) if c + 1 < self.stack.len() => {
                self.cursor = Some(c + 1);
                self.stack.get(c + 1)
            }
            _ => None,
        }
    }

    /// The entry a back step would land on, without moving the cursor.
    pub fn peek_back(&self) -> Option<&Location> {
        let c = self.cursor?;
        if c == 0 {
            return None;
        }
        self.stack.get(c - 1)
    }

    pub fn peek_forward(&self) -> Option<&Location> {
        let c = self.cursor?;
        self.stack.get(c + 1)
    }

    pub fn current(&self) -> Option<&Location> {
        self.stack.get(self.cursor?)
    }

    pub fn back_enabled(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn forward_enabled(&self) -> bool {
        match self.cursor {
            Some(c) => c + 1 < self.stack.len(),
            None => false,
        }
    }

    /// Seed the stack from previously persisted visits, oldest first.
    /// Only applies before the first live visit.
    pub fn hydrate(&mut self, chronological: Vec<Location>) {
        if !self.stack.is_empty() || chronological.is_empty() {
            return;
        }
        self.stack = chronological;
        self.cursor = Some(self.stack.len() - 1);
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[Location] {
        &self.stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemType;

    fn loc(title: &str) -> Location {
        Location::new(ItemType::Group, title.len() as i64, title)
    }

    #[test]
    fn test_fresh_visit_truncates_forward_entries() {
        let mut history = NavigationHistory::new();
        history.visit(loc("A"));
        history.visit(loc("B"));
        history.visit(loc("C"));
        assert!(history.go_back().is_some()); // at B

        history.visit(loc("D"));
        let titles: Vec<_> = history.entries().iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "D"]);
        assert_eq!(history.cursor(), Some(2));
    }

    #[test]
    fn test_back_at_start_is_noop() {
        let mut history = NavigationHistory::new();
        history.visit(loc("A"));
        assert!(history.go_back().is_none());
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.len(), 1);

        let mut empty = NavigationHistory::new();
        assert!(empty.go_back().is_none());
        assert_eq!(empty.cursor(), None);
    }

    #[test]
    fn test_forward_at_end_is_noop() {
        let mut history = NavigationHistory::new();
        history.visit(loc("A"));
        history.visit(loc("B"));
        assert!(history.go_forward().is_none());
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn test_back_then_forward_round_trip() {
        let mut history = NavigationHistory::new();
        history.visit(loc("A"));
        history.visit(loc("B"));
        assert_eq!(history.go_back().unwrap().title, "A");
        assert_eq!(history.go_forward().unwrap().title, "B");
        assert_eq!(history.current().unwrap().title, "B");
    }

    #[test]
    fn test_button_state_follows_cursor_and_length() {
        let mut history = NavigationHistory::new();
        assert!(!history.back_enabled());
        assert!(!history.forward_enabled());

        history.visit(loc("A"));
        history.visit(loc("B"));
        history.visit(loc("C"));
        assert!(history.back_enabled());
        assert!(!history.forward_enabled());

        history.go_back();
        assert!(history.back_enabled());
        assert!(history.forward_enabled());

        history.go_back();
        assert!(!history.back_enabled());
        assert!(history.forward_enabled());
    }

    #[test]
    fn test_same_location_still_pushes() {
        let mut history = NavigationHistory::new();
        history.visit(loc("A"));
        history.visit(loc("A"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
        assert!(history.back_enabled());
    }

    #[test]
    fn test_hydrate_sets_cursor_to_latest() {
        let mut history = NavigationHistory::new();
        history.hydrate(vec![loc("A"), loc("B"), loc("C")]);
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(history.current().unwrap().title, "C");
    }

    #[test]
    fn test_hydrate_after_visit_is_ignored() {
        let mut history = NavigationHistory::new();
        history.visit(loc("A"));
        history.hydrate(vec![loc("X"), loc("Y")]);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().unwrap().title, "A");
    }
}
