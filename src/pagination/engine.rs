//! Page assignment
//!
//! Pure function over an ordered sequence of visible item indices: the k-th
//! visible item (0-based) lands on page `k / items_per_page + 1`, and the
//! page count is `ceil(count / items_per_page)` with a minimum of one page.

use crate::item::ItemIndex;
use serde::Serialize;
use std::collections::HashMap;
use std::num::NonZeroUsize;

/// Page numbers for one visible set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageAssignment {
    order: Vec<ItemIndex>,
    #[serde(skip)]
    page_of: HashMap<ItemIndex, usize>,
    items_per_page: NonZeroUsize,
    total_pages: usize,
}

/// Assign every visible item to a page
#[must_use]
pub fn paginate(visible: &[ItemIndex], items_per_page: NonZeroUsize) -> PageAssignment {
    let per_page = items_per_page.get();
    let page_of = visible
        .iter()
        .enumerate()
        .map(|(k, index)| (*index, k / per_page + 1))
        .collect();

    PageAssignment {
        order: visible.to_vec(),
        page_of,
        items_per_page,
        total_pages: visible.len().div_ceil(per_page).max(1),
    }
}

impl PageAssignment {
    /// Page of `index`, or `None` if the item is not in the visible set
    #[must_use]
    pub fn page_of(&self, index: ItemIndex) -> Option<usize> {
        self.page_of.get(&index).copied()
    }

    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    #[must_use]
    pub const fn items_per_page(&self) -> NonZeroUsize {
        self.items_per_page
    }

    /// Number of paginated items
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Items on exactly `page` (empty if the page does not exist)
    #[must_use]
    pub fn items_on_page(&self, page: usize) -> &[ItemIndex] {
        let per_page = self.items_per_page.get();
        if page == 0 {
            return &[];
        }
        let start = (page - 1).saturating_mul(per_page).min(self.order.len());
        let end = page.saturating_mul(per_page).min(self.order.len());
        &self.order[start..end]
    }

    /// Items on pages `1..=page`
    #[must_use]
    pub fn items_through_page(&self, page: usize) -> &[ItemIndex] {
        let end = page.saturating_mul(self.items_per_page.get()).min(self.order.len());
        &self.order[..end]
    }

    /// Whether everything fits on a single page
    #[must_use]
    pub fn fits_one_page(&self) -> bool {
        self.order.len() <= self.items_per_page.get()
    }
}
