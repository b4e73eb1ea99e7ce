//! Incremental-reveal strategy state

use super::engine::PageAssignment;
use crate::item::ItemIndex;
use serde::Serialize;

/// Label of the reveal button
pub const LOAD_MORE_LABEL: &str = "Load More";

/// Pages `1..=revealed_page` are shown; only grows until reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncrementalReveal {
    revealed_page: usize,
    total_pages: usize,
}

impl IncrementalReveal {
    #[must_use]
    pub fn new(total_pages: usize) -> Self {
        Self {
            revealed_page: 1,
            total_pages: total_pages.max(1),
        }
    }

    pub fn reset(&mut self, total_pages: usize) {
        *self = Self::new(total_pages);
    }

    /// Reveal one more page, if any remain
    pub fn reveal_more(&mut self) -> bool {
        if self.exhausted() {
            return false;
        }
        self.revealed_page += 1;
        true
    }

    #[must_use]
    pub const fn revealed_page(&self) -> usize {
        self.revealed_page
    }

    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Every page is revealed
    #[must_use]
    pub const fn exhausted(&self) -> bool {
        self.revealed_page >= self.total_pages
    }

    #[must_use]
    pub fn shown<'a>(&self, assignment: &'a PageAssignment) -> &'a [ItemIndex] {
        assignment.items_through_page(self.revealed_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_until_exhausted() {
        let mut reveal = IncrementalReveal::new(3);
        assert!(reveal.reveal_more());
        assert!(reveal.reveal_more());
        assert!(reveal.exhausted());
        assert!(!reveal.reveal_more());
        assert_eq!(reveal.revealed_page(), 3);
    }

    #[test]
    fn test_reset_starts_over() {
        let mut reveal = IncrementalReveal::new(2);
        reveal.reveal_more();
        reveal.reset(5);
        assert_eq!(reveal.revealed_page(), 1);
        assert!(!reveal.exhausted());
    }

    #[test]
    fn test_single_page_is_exhausted() {
        assert!(IncrementalReveal::new(1).exhausted());
        assert!(IncrementalReveal::new(0).exhausted());
    }
}
