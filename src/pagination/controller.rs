//! Pagination controller
//!
//! Consumes filter notifications, keeps a [`PageAssignment`] over the current
//! visible set, and decides which items are shown. Visibility changes are
//! written to [`Item::currently_visible`] and handed to the transition
//! scheduler as reveals and hides.
//!
//! # Dynamic restyle
//!
//! When the configured style is an indexed one and a filter leaves more than
//! one page of results, the controller presents the filtered set with the
//! incremental strategy instead, and returns to the configured strategy when
//! the filter is cleared. This can be switched off with
//! `restyle_on_filter = false`.

use super::engine::{PageAssignment, paginate};
use super::incremental::{IncrementalReveal, LOAD_MORE_LABEL};
use super::indexed::IndexedPages;
use super::types::{PaginationStyle, Strategy};
use super::view::{Controls, ControlsView, PageLink};
use crate::filters::{FilterEvent, VisibleSet};
use crate::item::{Item, ItemIndex};
use crate::transition::TransitionScheduler;
use std::num::NonZeroUsize;

/// Default page size
pub const DEFAULT_ITEMS_PER_PAGE: NonZeroUsize = match NonZeroUsize::new(6) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

/// Pagination options of one container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSettings {
    /// Pagination is on and a control region exists
    pub enabled: bool,
    pub items_per_page: NonZeroUsize,
    pub style: PaginationStyle,
    pub restyle_on_filter: bool,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            style: PaginationStyle::Default,
            restyle_on_filter: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginationController {
    settings: PaginationSettings,
    page_size: NonZeroUsize,
    strategy: Strategy,
    indexed: IndexedPages,
    incremental: IncrementalReveal,
    assignment: PageAssignment,
    visible: VisibleSet,
}

impl PaginationController {
    /// Paginate the initial visible set of a container holding `item_count` items
    ///
    /// With pagination disabled the page size is the item count, so
    /// everything lands on a single page.
    #[must_use]
    pub fn new(settings: PaginationSettings, visible: &VisibleSet, item_count: usize) -> Self {
        let page_size = if settings.enabled {
            settings.items_per_page
        } else {
            NonZeroUsize::new(item_count).unwrap_or(NonZeroUsize::MIN)
        };
        let assignment = paginate(visible.as_slice(), page_size);
        let total_pages = assignment.total_pages();

        Self {
            settings,
            page_size,
            strategy: settings.style.strategy(),
            indexed: IndexedPages::new(total_pages),
            incremental: IncrementalReveal::new(total_pages),
            assignment,
            visible: visible.clone(),
        }
    }

    /// Lay items out for the first time, without transitions
    pub fn render(&self, items: &mut [Item], scheduler: &mut TransitionScheduler) {
        let shown = self.shown();
        for item in items.iter_mut() {
            item.currently_visible = shown.binary_search(&item.index).is_ok();
            scheduler.place(item.index, item.currently_visible);
        }
    }

    /// React to a filter notification
    ///
    /// Pagination is recomputed and reset to the first page only when the
    /// visible set or the presented strategy actually changed.
    pub fn on_filter_event(
        &mut self,
        event: &FilterEvent,
        visible: &VisibleSet,
        items: &mut [Item],
        scheduler: &mut TransitionScheduler,
    ) {
        let strategy = self.strategy_for(event, visible.len());
        if *visible == self.visible && strategy == self.strategy {
            tracing::trace!(event = event.name(), "visible set unchanged, keeping page");
            return;
        }

        if strategy != self.strategy {
            tracing::debug!(from = %self.strategy, to = %strategy, "pagination strategy switched");
        }
        self.strategy = strategy;
        self.visible = visible.clone();
        self.assignment = paginate(visible.as_slice(), self.page_size);
        self.indexed.reset(self.assignment.total_pages());
        self.incremental.reset(self.assignment.total_pages());
        tracing::debug!(
            visible = visible.len(),
            total_pages = self.assignment.total_pages(),
            "pagination reset"
        );

        self.apply(items, scheduler);
    }

    /// Show page `page` (indexed strategy only)
    ///
    /// Returns `false` and changes nothing when the page is out of range or
    /// the incremental strategy is in effect.
    pub fn go_to_page(
        &mut self,
        page: usize,
        items: &mut [Item],
        scheduler: &mut TransitionScheduler,
    ) -> bool {
        if self.strategy != Strategy::Indexed || !self.indexed.go_to(page) {
            tracing::trace!(page, "page request ignored");
            return false;
        }
        tracing::debug!(page, total_pages = self.indexed.total_pages(), "page changed");
        self.apply(items, scheduler);
        true
    }

    pub fn next_page(&mut self, items: &mut [Item], scheduler: &mut TransitionScheduler) -> bool {
        let page = self.indexed.current_page() + 1;
        self.go_to_page(page, items, scheduler)
    }

    pub fn previous_page(
        &mut self,
        items: &mut [Item],
        scheduler: &mut TransitionScheduler,
    ) -> bool {
        let page = self.indexed.current_page().saturating_sub(1);
        self.go_to_page(page, items, scheduler)
    }

    /// Reveal one more page (incremental strategy only)
    pub fn reveal_more(&mut self, items: &mut [Item], scheduler: &mut TransitionScheduler) -> bool {
        if self.strategy != Strategy::Incremental || !self.incremental.reveal_more() {
            tracing::trace!("reveal request ignored");
            return false;
        }
        tracing::debug!(
            revealed_page = self.incremental.revealed_page(),
            total_pages = self.incremental.total_pages(),
            "more items revealed"
        );
        self.apply(items, scheduler);
        true
    }

    /// Current state of the control region
    #[must_use]
    pub fn view(&self) -> ControlsView {
        let controls = match (self.strategy, self.settings.style) {
            (Strategy::Incremental, _) => Controls::LoadMore {
                button_visible: !self.incremental.exhausted(),
                label: LOAD_MORE_LABEL.to_string(),
                revealed_page: self.incremental.revealed_page(),
                total_pages: self.incremental.total_pages(),
            },
            (Strategy::Indexed, PaginationStyle::PreviousNext) => Controls::PreviousNext {
                prev_enabled: self.indexed.prev_enabled(),
                next_enabled: self.indexed.next_enabled(),
                current_page: self.indexed.current_page(),
                total_pages: self.indexed.total_pages(),
            },
            (Strategy::Indexed, _) => Controls::Numbered {
                pages: (1..=self.indexed.total_pages())
                    .map(|number| PageLink {
                        number,
                        active: number == self.indexed.current_page(),
                    })
                    .collect(),
                prev_enabled: self.indexed.prev_enabled(),
                next_enabled: self.indexed.next_enabled(),
            },
        };

        ControlsView {
            visible: self.settings.enabled && !self.assignment.fits_one_page(),
            style: self.settings.style,
            strategy: self.strategy,
            controls,
        }
    }

    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Whether a filter switched the presentation away from the configured one
    #[must_use]
    pub fn is_restyled(&self) -> bool {
        self.strategy != self.settings.style.strategy()
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.indexed.current_page()
    }

    #[must_use]
    pub const fn revealed_page(&self) -> usize {
        self.incremental.revealed_page()
    }

    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.assignment.total_pages()
    }

    /// Page size in effect (the item count when pagination is disabled)
    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    #[must_use]
    pub const fn assignment(&self) -> &PageAssignment {
        &self.assignment
    }

    #[must_use]
    pub const fn settings(&self) -> &PaginationSettings {
        &self.settings
    }

    fn strategy_for(&self, event: &FilterEvent, visible_count: usize) -> Strategy {
        let configured = self.settings.style.strategy();
        match event {
            FilterEvent::FilterCleared => configured,
            FilterEvent::FilterApplied { .. } => {
                if self.settings.restyle_on_filter
                    && configured == Strategy::Indexed
                    && visible_count > self.page_size.get()
                {
                    Strategy::Incremental
                } else {
                    configured
                }
            }
        }
    }

    fn shown(&self) -> &[ItemIndex] {
        match self.strategy {
            Strategy::Indexed => self.indexed.shown(&self.assignment),
            Strategy::Incremental => self.incremental.shown(&self.assignment),
        }
    }

    /// Bring every item's visibility in line with the current page state
    fn apply(&self, items: &mut [Item], scheduler: &mut TransitionScheduler) {
        let shown = self.shown();
        for item in items.iter_mut() {
            let show = shown.binary_search(&item.index).is_ok();
            if show == item.currently_visible {
                continue;
            }
            item.currently_visible = show;
            if show {
                scheduler.reveal(item.index);
            } else {
                scheduler.hide(item.index);
            }
        }
    }
}
