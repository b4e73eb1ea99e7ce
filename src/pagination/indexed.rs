//! Indexed-pages strategy state

use super::engine::PageAssignment;
use crate::item::ItemIndex;
use serde::Serialize;

/// Current page within `1..=total_pages`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexedPages {
    current_page: usize,
    total_pages: usize,
}

impl IndexedPages {
    #[must_use]
    pub fn new(total_pages: usize) -> Self {
        Self {
            current_page: 1,
            total_pages: total_pages.max(1),
        }
    }

    /// Back to page 1 of a new page count
    pub fn reset(&mut self, total_pages: usize) {
        *self = Self::new(total_pages);
    }

    /// Move to `page`; out-of-range requests are ignored
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages {
            return false;
        }
        self.current_page = page;
        true
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    #[must_use]
    pub const fn prev_enabled(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn next_enabled(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Items shown under this state
    #[must_use]
    pub fn shown<'a>(&self, assignment: &'a PageAssignment) -> &'a [ItemIndex] {
        assignment.items_on_page(self.current_page)
    }
}
