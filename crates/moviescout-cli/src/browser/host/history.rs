//! Navigation history stack.

/// One history record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEntry {
    /// The browser page itself.
    Page,
    /// Synthetic entry pushed while the detail modal is open.
    Modal {
        /// Movie shown when the entry was pushed.
        movie_id: u64,
    },
}

impl HistoryEntry {
    /// Whether this is a synthetic modal entry.
    #[must_use]
    pub const fn is_modal(self) -> bool {
        matches!(self, Self::Modal { .. })
    }
}

/// Event produced by a backward traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopState {
    /// Entry that became current.
    pub state: HistoryEntry,
}

/// History stack with a cursor, mirroring the page history of a web
/// browser: pushing drops forward entries, going back keeps them.
#[derive(Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    traversals: usize,
}

impl History {
    /// Creates a history holding only the page entry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![HistoryEntry::Page],
            cursor: 0,
            traversals: 0,
        }
    }

    /// Current entry.
    #[must_use]
    pub fn current(&self) -> HistoryEntry {
        self.entries
            .get(self.cursor)
            .copied()
            .unwrap_or(HistoryEntry::Page)
    }

    /// Number of entries up to and including the current one.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.cursor.saturating_add(1)
    }

    /// Number of successful backward traversals so far.
    #[cfg(test)]
    pub const fn traversals(&self) -> usize {
        self.traversals
    }

    /// Pushes `entry` after the current one, discarding forward entries.
    pub fn push_state(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.depth());
        self.entries.push(entry);
        self.cursor = self.entries.len().saturating_sub(1);
    }

    /// Steps back once.
    ///
    /// Returns `None` at the first entry: going further back leaves the page.
    pub fn back(&mut self) -> Option<PopState> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor = self.cursor.saturating_sub(1);
        self.traversals = self.traversals.saturating_add(1);
        Some(PopState {
            state: self.current(),
        })
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_new_history_is_single_page() {
        // Arrange & Act
        let history = History::new();

        // Assert
        assert_eq!(history.depth(), 1);
        assert_eq!(history.current(), HistoryEntry::Page);
    }

    #[test]
    fn test_push_then_back() {
        // Arrange
        let mut history = History::new();

        // Act
        history.push_state(HistoryEntry::Modal { movie_id: 7 });
        let popped = history.back();

        // Assert
        assert_eq!(popped.unwrap().state, HistoryEntry::Page);
        assert_eq!(history.depth(), 1);
        assert_eq!(history.traversals(), 1);
    }

    #[test]
    fn test_back_at_first_entry_is_none() {
        // Arrange
        let mut history = History::new();

        // Act & Assert
        assert!(history.back().is_none());
        assert_eq!(history.traversals(), 0);
    }

    #[test]
    fn test_push_discards_forward_entries() {
        // Arrange
        let mut history = History::new();
        history.push_state(HistoryEntry::Modal { movie_id: 1 });
        history.back();

        // Act
        history.push_state(HistoryEntry::Modal { movie_id: 2 });

        // Assert
        assert_eq!(history.depth(), 2);
        assert_eq!(history.current(), HistoryEntry::Modal { movie_id: 2 });
        assert!(history.current().is_modal());
    }
}
