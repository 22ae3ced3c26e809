//! Page selector shown above the result grid.

use moviescout_api::tmdb::MAX_PAGE;

/// Pages shown around the active page.
const PAGE_RANGE: usize = 3;

/// Pages always shown at each end.
const MARGIN_PAGES: usize = 2;

/// One affordance of the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Zero-based page index.
    Page(usize),
    /// Gap of omitted pages.
    Break,
}

/// Page selector over `page_count` pages with one active page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_count: usize,
    active: usize,
}

impl Paginator {
    /// Builds the selector from the total page count and the one-based
    /// current page.
    ///
    /// Returns `None` when there is at most one page, in which case no
    /// selector is shown. Counts above the catalog's page limit are capped.
    #[must_use]
    pub fn new(total_pages: u32, current_page: u32) -> Option<Self> {
        let page_count = usize::try_from(total_pages.min(MAX_PAGE)).ok()?;
        if page_count <= 1 {
            return None;
        }
        let active = usize::try_from(current_page.saturating_sub(1))
            .ok()?
            .min(page_count.saturating_sub(1));
        Some(Self { page_count, active })
    }

    /// Number of selectable pages.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Zero-based active page index.
    #[must_use]
    pub const fn active(&self) -> usize {
        self.active
    }

    /// Zero-based selection to report, if `index` is a different page.
    #[must_use]
    pub const fn select(&self, index: usize) -> Option<usize> {
        if index == self.active || index >= self.page_count {
            None
        } else {
            Some(index)
        }
    }

    /// Selection for the "previous" affordance.
    #[must_use]
    pub const fn previous(&self) -> Option<usize> {
        match self.active.checked_sub(1) {
            Some(index) => self.select(index),
            None => None,
        }
    }

    /// Selection for the "next" affordance.
    #[must_use]
    pub const fn next(&self) -> Option<usize> {
        match self.active.checked_add(1) {
            Some(index) => self.select(index),
            None => None,
        }
    }

    /// Page affordances in display order.
    ///
    /// Shows the margin pages at both ends and a window of pages around the
    /// active one. Gaps become [`PageItem::Break`], except that a gap hiding
    /// a single page shows that page instead.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn items(&self) -> Vec<PageItem> {
        let count = self.page_count;
        if count <= PAGE_RANGE {
            return (0..count).map(PageItem::Page).collect();
        }

        // Window sides are halves of PAGE_RANGE; everything below is kept
        // in doubled units to stay in integers.
        let range = i64::try_from(PAGE_RANGE).unwrap_or(i64::MAX);
        let total = i64::try_from(count).unwrap_or(i64::MAX);
        let selected = i64::try_from(self.active).unwrap_or(0);

        let (left, right) = if 2 * selected > 2 * total - range {
            let right = 2 * (total - selected);
            (2 * range - right, right)
        } else if 2 * selected < range {
            let left = 2 * selected;
            (left, 2 * range - left)
        } else {
            (range, range)
        };
        let right = if selected == 0 && range > 1 {
            right - 2
        } else {
            right
        };

        let mut raw: Vec<(PageItem, usize)> = Vec::with_capacity(count);
        for index in 0..count {
            let page = index + 1;
            let doubled = 2 * i64::try_from(index).unwrap_or(i64::MAX);
            let in_margin = page <= MARGIN_PAGES || page > count.saturating_sub(MARGIN_PAGES);
            let in_window =
                doubled >= 2 * selected - left && doubled <= 2 * selected + right;

            if in_margin || in_window {
                raw.push((PageItem::Page(index), index));
            } else if raw
                .last()
                .is_some_and(|(item, _)| *item != PageItem::Break)
            {
                raw.push((PageItem::Break, index));
            }
        }

        raw.iter()
            .enumerate()
            .map(|(i, &(item, index))| {
                if item != PageItem::Break {
                    return item;
                }
                let before = i.checked_sub(1).and_then(|j| raw.get(j));
                let after = raw.get(i + 1);
                match (before, after) {
                    (Some(&(PageItem::Page(_), b)), Some(&(PageItem::Page(_), a)))
                        if a - b <= 2 =>
                    {
                        PageItem::Page(index)
                    }
                    _ => item,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    use super::PageItem::{Break, Page};

    #[test]
    fn test_single_page_is_omitted() {
        // Arrange & Act & Assert
        assert!(Paginator::new(0, 1).is_none());
        assert!(Paginator::new(1, 1).is_none());
        assert!(Paginator::new(2, 1).is_some());
    }

    #[test]
    fn test_active_index_follows_current_page() {
        // Arrange
        let total = 37;

        // Act & Assert
        for page in 1..=total {
            let paginator = Paginator::new(total, page).unwrap();
            assert_eq!(paginator.active(), usize::try_from(page - 1).unwrap());
        }
    }

    #[test]
    fn test_page_count_is_capped() {
        // Arrange & Act
        let paginator = Paginator::new(40_000, 1).unwrap();

        // Assert
        assert_eq!(paginator.page_count(), 500);
    }

    #[test]
    fn test_few_pages_show_all() {
        // Arrange
        let paginator = Paginator::new(3, 2).unwrap();

        // Act
        let items = paginator.items();

        // Assert
        assert_eq!(items, vec![Page(0), Page(1), Page(2)]);
    }

    #[test]
    fn test_items_at_first_page() {
        // Arrange
        let paginator = Paginator::new(10, 1).unwrap();

        // Act
        let items = paginator.items();

        // Assert
        assert_eq!(
            items,
            vec![Page(0), Page(1), Page(2), Break, Page(8), Page(9)]
        );
    }

    #[test]
    fn test_items_in_middle_fill_single_page_gap() {
        // Arrange
        let paginator = Paginator::new(10, 5).unwrap();

        // Act
        let items = paginator.items();

        // Assert: page index 2 replaces a break hiding only that page
        assert_eq!(
            items,
            vec![
                Page(0),
                Page(1),
                Page(2),
                Page(3),
                Page(4),
                Page(5),
                Break,
                Page(8),
                Page(9)
            ]
        );
    }

    #[test]
    fn test_items_at_last_page() {
        // Arrange
        let paginator = Paginator::new(10, 10).unwrap();

        // Act
        let items = paginator.items();

        // Assert
        assert_eq!(
            items,
            vec![Page(0), Page(1), Break, Page(7), Page(8), Page(9)]
        );
    }

    #[test]
    fn test_select_reports_only_changes() {
        // Arrange
        let paginator = Paginator::new(5, 1).unwrap();

        // Act & Assert
        assert_eq!(paginator.select(0), None);
        assert_eq!(paginator.select(3), Some(3));
        assert_eq!(paginator.select(5), None);
        assert_eq!(paginator.previous(), None);
        assert_eq!(paginator.next(), Some(1));
    }

    #[test]
    fn test_next_at_last_page_is_none() {
        // Arrange
        let paginator = Paginator::new(5, 5).unwrap();

        // Act & Assert
        assert_eq!(paginator.next(), None);
        assert_eq!(paginator.previous(), Some(3));
    }
}
