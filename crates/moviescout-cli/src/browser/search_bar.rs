//! Single-line search field.

/// Search text plus its edit mode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchBar {
    text: String,
    editing: bool,
}

impl SearchBar {
    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the field has keyboard focus.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// Focuses the field, keeping its text.
    pub const fn focus(&mut self) {
        self.editing = true;
    }

    /// Leaves the field without submitting.
    pub const fn blur(&mut self) {
        self.editing = false;
    }

    /// Appends a character.
    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// Removes the last character.
    pub fn pop(&mut self) {
        self.text.pop();
    }

    /// Leaves edit mode and returns the text to submit.
    pub fn submit(&mut self) -> String {
        self.editing = false;
        self.text.clone()
    }

    /// Whether the minimum-query hint is shown (focused and blank).
    #[must_use]
    pub fn shows_hint(&self) -> bool {
        self.editing && self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_and_submit() {
        // Arrange
        let mut bar = SearchBar::default();
        bar.focus();

        // Act
        for c in "dunee".chars() {
            bar.push(c);
        }
        bar.pop();
        let submitted = bar.submit();

        // Assert
        assert_eq!(submitted, "dune");
        assert!(!bar.is_editing());
        assert_eq!(bar.text(), "dune");
    }

    #[test]
    fn test_hint_only_when_focused_and_blank() {
        // Arrange
        let mut bar = SearchBar::default();

        // Act & Assert
        assert!(!bar.shows_hint());
        bar.focus();
        assert!(bar.shows_hint());
        bar.push(' ');
        assert!(bar.shows_hint());
        bar.push('x');
        assert!(!bar.shows_hint());
        bar.blur();
        assert!(!bar.shows_hint());
    }
}
