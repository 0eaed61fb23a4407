//! Back/forward history of a region.

use crate::context::NavigationContext;
use crate::debug_log;

/// Default number of entries a journal keeps.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 100;

/// Whether a region has shown anything yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigatorState {
    /// No current entry: before the first navigation or after `clear()`.
    Empty,
    /// A current entry exists.
    Active,
}

/// Bounded navigation history.
///
/// Entries before the current index are back history, entries after it are
/// forward history. When recording would exceed the capacity the oldest
/// back entry is dropped.
#[derive(Debug, Clone)]
pub struct Journal {
    entries: Vec<NavigationContext>,
    current: Option<usize>,
    capacity: usize,
}

impl Journal {
    /// Create an empty journal with [`DEFAULT_JOURNAL_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_JOURNAL_CAPACITY)
    }

    /// Create an empty journal. A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            current: None,
            capacity: capacity.max(1),
        }
    }

    pub fn state(&self) -> NavigatorState {
        if self.current.is_some() {
            NavigatorState::Active
        } else {
            NavigatorState::Empty
        }
    }

    /// Record a new current entry, dropping forward history.
    pub fn record(&mut self, context: NavigationContext) {
        match self.current {
            Some(index) => self.entries.truncate(index + 1),
            None => self.entries.clear(),
        }
        self.entries.push(context);

        if self.entries.len() > self.capacity {
            let dropped = self.entries.len() - self.capacity;
            self.entries.drain(..dropped);
            debug_log!(
                "Journal full (capacity {}): dropped {} oldest entr{}",
                self.capacity,
                dropped,
                if dropped == 1 { "y" } else { "ies" }
            );
        }

        self.current = Some(self.entries.len() - 1);
    }

    /// Step back one entry and return the new current entry.
    pub fn move_back(&mut self) -> Option<&NavigationContext> {
        let index = self.current.filter(|&i| i > 0)? - 1;
        self.current = Some(index);
        self.entries.get(index)
    }

    /// Step forward one entry and return the new current entry.
    pub fn move_forward(&mut self) -> Option<&NavigationContext> {
        let index = self.current.filter(|&i| i + 1 < self.entries.len())? + 1;
        self.current = Some(index);
        self.entries.get(index)
    }

    /// The entry `move_back` would make current.
    pub fn peek_back(&self) -> Option<&NavigationContext> {
        let index = self.current?;
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// The entry `move_forward` would make current.
    pub fn peek_forward(&self) -> Option<&NavigationContext> {
        self.entries.get(self.current? + 1)
    }

    pub fn current(&self) -> Option<&NavigationContext> {
        self.entries.get(self.current?)
    }

    pub fn can_go_back(&self) -> bool {
        self.current.is_some_and(|i| i > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.current.is_some_and(|i| i + 1 < self.entries.len())
    }

    /// Entries before the current one, oldest first.
    pub fn back_entries(&self) -> &[NavigationContext] {
        match self.current {
            Some(index) => &self.entries[..index],
            None => &[],
        }
    }

    /// Entries after the current one, nearest first.
    pub fn forward_entries(&self) -> &[NavigationContext] {
        match self.current {
            Some(index) => &self.entries[index + 1..],
            None => &[],
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;

    fn ctx(text: &str) -> NavigationContext {
        NavigationContext::detached(Address::parse(text).unwrap())
    }

    fn paths(entries: &[NavigationContext]) -> Vec<String> {
        entries.iter().map(|c| c.address().to_string()).collect()
    }

    #[test]
    fn test_empty_journal() {
        let journal = Journal::new();
        assert_eq!(journal.state(), NavigatorState::Empty);
        assert!(journal.current().is_none());
        assert!(!journal.can_go_back());
        assert!(!journal.can_go_forward());
        assert!(journal.back_entries().is_empty());
        assert!(journal.peek_back().is_none());
        assert!(journal.peek_forward().is_none());
    }

    #[test]
    fn test_navigation() {
        let mut journal = Journal::new();

        journal.record(ctx("app://users"));
        assert_eq!(journal.state(), NavigatorState::Active);
        assert!(!journal.can_go_back());

        journal.record(ctx("app://users/123"));
        assert_eq!(journal.current().unwrap().address().path(), "users/123");
        assert!(journal.can_go_back());

        assert_eq!(journal.move_back().unwrap().address().path(), "users");
        assert!(journal.can_go_forward());
        assert!(!journal.can_go_back());
        assert!(journal.move_back().is_none());

        assert_eq!(journal.move_forward().unwrap().address().path(), "users/123");
        assert!(!journal.can_go_forward());
        assert!(journal.move_forward().is_none());
    }

    #[test]
    fn test_record_truncates_forward_history() {
        let mut journal = Journal::new();
        journal.record(ctx("app://a"));
        journal.record(ctx("app://b"));
        journal.record(ctx("app://c"));
        journal.move_back();
        journal.move_back();
        assert_eq!(paths(journal.forward_entries()), vec!["app://b", "app://c"]);

        journal.record(ctx("app://d"));
        assert!(!journal.can_go_forward());
        assert_eq!(paths(journal.back_entries()), vec!["app://a"]);
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut journal = Journal::with_capacity(3);
        for text in ["app://1", "app://2", "app://3", "app://4"] {
            journal.record(ctx(text));
        }

        assert_eq!(journal.len(), 3);
        assert_eq!(paths(journal.back_entries()), vec!["app://2", "app://3"]);
        assert_eq!(journal.current().unwrap().address().as_str(), "app://4");
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut journal = Journal::with_capacity(0);
        assert_eq!(journal.capacity(), 1);
        journal.record(ctx("app://a"));
        journal.record(ctx("app://b"));
        assert_eq!(journal.len(), 1);
        assert!(!journal.can_go_back());
    }

    #[test]
    fn test_peek_does_not_move() {
        let mut journal = Journal::new();
        journal.record(ctx("app://a"));
        journal.record(ctx("app://b"));

        assert_eq!(journal.peek_back().unwrap().address().path(), "a");
        assert_eq!(journal.current().unwrap().address().path(), "b");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut journal = Journal::new();
        journal.record(ctx("app://a"));
        journal.record(ctx("app://b"));

        journal.clear();
        assert_eq!(journal.state(), NavigatorState::Empty);
        journal.clear();
        assert_eq!(journal.state(), NavigatorState::Empty);
        assert!(journal.is_empty());
        assert!(!journal.can_go_back());
        assert!(!journal.can_go_forward());
    }
}
