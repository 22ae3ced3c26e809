//! Scrollable viewport over the result grid.

/// Vertical scroll state, in terminal lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    position: u16,
    max_position: u16,
    threshold: u16,
}

impl Viewport {
    /// Creates a viewport at the origin.
    #[must_use]
    pub const fn new(threshold: u16) -> Self {
        Self {
            position: 0,
            max_position: u16::MAX,
            threshold,
        }
    }

    /// Current scroll position.
    #[must_use]
    pub const fn position(&self) -> u16 {
        self.position
    }

    /// Scroll-to-top threshold.
    #[cfg(test)]
    pub const fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Whether `position` lies strictly beyond the threshold.
    #[must_use]
    pub const fn is_past_threshold(&self, position: u16) -> bool {
        position > self.threshold
    }

    /// Sets the furthest reachable position (content height minus view height).
    pub fn set_max_position(&mut self, max_position: u16) {
        self.max_position = max_position;
    }

    /// Clamps a requested position to the scrollable range.
    #[must_use]
    pub fn clamp(&self, position: u16) -> u16 {
        position.min(self.max_position)
    }

    /// Position after scrolling by `delta` lines (negative scrolls up).
    #[must_use]
    pub fn offset_by(&self, delta: i32) -> u16 {
        let target = i32::from(self.position).saturating_add(delta).max(0);
        self.clamp(u16::try_from(target).unwrap_or(u16::MAX))
    }

    /// Moves to `position` (already clamped by the caller).
    pub const fn scroll_to(&mut self, position: u16) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        // Arrange
        let viewport = Viewport::new(12);

        // Act & Assert
        assert!(!viewport.is_past_threshold(12));
        assert!(viewport.is_past_threshold(13));
    }

    #[test]
    fn test_offset_is_clamped() {
        // Arrange
        let mut viewport = Viewport::new(12);
        viewport.set_max_position(30);
        viewport.scroll_to(5);

        // Act & Assert
        assert_eq!(viewport.offset_by(-10), 0);
        assert_eq!(viewport.offset_by(3), 8);
        assert_eq!(viewport.offset_by(100), 30);
    }
}
