//! Recall of previously submitted commands

use std::cell::RefCell;
use std::rc::Rc;

/// Ordered log of past submissions, oldest first.
///
/// The engine only reads it; whoever evaluates commands decides what goes in.
pub trait HistoryStore {
    fn size(&self) -> usize;

    fn get(&self, index: usize) -> Option<String>;
}

/// In-memory history log.
///
/// Clones share the same log, so an evaluator can append to it while the
/// engine browses it.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Rc<RefCell<Vec<String>>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, entry: &str) {
        self.entries.borrow_mut().push(entry.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

impl<S: AsRef<str>> FromIterator<S> for MemoryHistory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self {
            entries: Rc::new(RefCell::new(entries)),
        }
    }
}

impl HistoryStore for MemoryHistory {
    fn size(&self) -> usize {
        self.entries.borrow().len()
    }

    fn get(&self, index: usize) -> Option<String> {
        self.entries.borrow().get(index).cloned()
    }
}

/// Position of the user in the history log; `None` means live editing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryNavigator {
    index: Option<usize>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_browsing(&self) -> bool {
        self.index.is_some()
    }

    /// Step towards older entries. Returns the entry to display, or `None`
    /// when the display should stay as it is (pinned at the oldest entry or
    /// empty history).
    pub fn up<H: HistoryStore + ?Sized>(&mut self, history: &H) -> Option<String> {
        let size = history.size();
        let from = self.index.map_or(size, |i| i.min(size));

        match from.checked_sub(1) {
            Some(index) => {
                self.index = Some(index);
                history.get(index)
            }
            None => {
                self.index = (size > 0).then_some(0);
                None
            }
        }
    }

    /// Step towards newer entries. Stays pinned at the newest entry.
    pub fn down<H: HistoryStore + ?Sized>(&mut self, history: &H) -> Option<String> {
        let index = self.index?;
        let next = index + 1;

        if next < history.size() {
            self.index = Some(next);
            history.get(next)
        } else {
            None
        }
    }

    /// Back to live editing
    pub fn reset(&mut self) {
        self.index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> MemoryHistory {
        ["a", "b", "c"].into_iter().collect()
    }

    #[test]
    fn test_up_walks_newest_to_oldest_then_pins() {
        let history = abc();
        let mut nav = HistoryNavigator::new();

        assert_eq!(nav.up(&history).as_deref(), Some("c"));
        assert_eq!(nav.up(&history).as_deref(), Some("b"));
        assert_eq!(nav.up(&history).as_deref(), Some("a"));
        assert_eq!(nav.up(&history), None);
        assert_eq!(nav.index(), Some(0));
    }

    #[test]
    fn test_down_walks_back_and_pins_at_newest() {
        let history = abc();
        let mut nav = HistoryNavigator::new();
        nav.up(&history);
        nav.up(&history);
        nav.up(&history);

        assert_eq!(nav.down(&history).as_deref(), Some("b"));
        assert_eq!(nav.down(&history).as_deref(), Some("c"));
        assert_eq!(nav.down(&history), None);
        assert_eq!(nav.index(), Some(2));
    }

    #[test]
    fn test_down_without_browsing_does_nothing() {
        let history = abc();
        let mut nav = HistoryNavigator::new();
        assert_eq!(nav.down(&history), None);
        assert!(!nav.is_browsing());
    }

    #[test]
    fn test_up_on_empty_history_stays_live() {
        let history = MemoryHistory::new();
        let mut nav = HistoryNavigator::new();
        assert_eq!(nav.up(&history), None);
        assert!(!nav.is_browsing());
    }

    #[test]
    fn test_reset_starts_from_newest_again() {
        let history = abc();
        let mut nav = HistoryNavigator::new();
        nav.up(&history);
        nav.up(&history);
        nav.reset();
        assert_eq!(nav.up(&history).as_deref(), Some("c"));
    }

    #[test]
    fn test_clones_share_entries() {
        let history = MemoryHistory::new();
        let writer = history.clone();
        writer.append("(+ 1 2)");
        assert_eq!(history.size(), 1);
        assert_eq!(history.get(0).as_deref(), Some("(+ 1 2)"));
        assert_eq!(history.get(1), None);
    }
}
