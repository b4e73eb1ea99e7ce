//! Checkbox selection state machine
//!
//! # States
//!
//! ```text
//!                 toggle(tag, on)
//! SelectAllActive ───────────────▶ PartialSelection ──┐ toggle(tag, on/off)
//!        ▲                               │     ▲      │ (tags remain)
//!        │  toggle(last tag, off)        │     └──────┘
//!        └───────────────────────────────┤
//!        ▲      activate_select_all()    │
//!        └───────────────────────────────┘
//! ```
//!
//! Every transition re-evaluates the visible set, updates the no-results
//! panel and produces exactly one [`FilterEvent`]: `FilterCleared` when the
//! transition lands in `SelectAllActive`, `FilterApplied` otherwise.

use super::engine::ItemFilterExt;
use super::events::FilterEvent;
use super::types::{FilterConfig, Selection, VisibleSet};
use crate::item::Item;
use crate::tags::{CategoryKey, TagKey};
use serde::Serialize;

/// Which of the two mutually exclusive checkbox states is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterState {
    /// The "All" checkbox is checked and no tag is selected
    SelectAllActive,
    /// At least one tag is selected
    PartialSelection,
}

/// Region shown instead of the grid when nothing matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoResultsPanel {
    pub message: String,
    pub shown: bool,
}

impl NoResultsPanel {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown: false,
        }
    }
}

/// Result of one filter transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub event: FilterEvent,
    pub visible: VisibleSet,
}

/// Owns the selection of one container
#[derive(Debug, Clone)]
pub struct FilterController {
    config: FilterConfig,
    selection: Selection,
    state: FilterState,
    visible: VisibleSet,
    no_results: Option<NoResultsPanel>,
}

impl FilterController {
    /// Start in the select-all state with every item visible
    #[must_use]
    pub fn new(config: FilterConfig, items: &[Item], no_results: Option<NoResultsPanel>) -> Self {
        let visible = items.matching(&Selection::new(), &config);
        Self {
            config,
            selection: Selection::new(),
            state: FilterState::SelectAllActive,
            visible,
            no_results,
        }
    }

    /// Check or uncheck one tag checkbox
    pub fn toggle(
        &mut self,
        items: &[Item],
        category: impl Into<CategoryKey>,
        tag: impl Into<TagKey>,
        checked: bool,
    ) -> FilterOutcome {
        let category = category.into();
        let tag = tag.into();

        if checked {
            self.selection.insert(category, tag);
            self.state = FilterState::PartialSelection;
        } else {
            self.selection.remove(&category, &tag);
            if self.selection.is_empty() {
                self.selection.clear();
                self.state = FilterState::SelectAllActive;
            }
        }

        self.settle(items)
    }

    /// Check the "All" checkbox, dropping every chosen tag
    pub fn activate_select_all(&mut self, items: &[Item]) -> FilterOutcome {
        self.selection.clear();
        self.state = FilterState::SelectAllActive;
        self.settle(items)
    }

    fn settle(&mut self, items: &[Item]) -> FilterOutcome {
        self.visible = items.matching(&self.selection, &self.config);

        if let Some(panel) = self.no_results.as_mut() {
            panel.shown = self.visible.is_empty();
        }

        let event = match self.state {
            FilterState::SelectAllActive => FilterEvent::FilterCleared,
            FilterState::PartialSelection => FilterEvent::FilterApplied {
                selection: self.selection.clone(),
                visible_count: self.visible.len(),
            },
        };
        tracing::debug!(state = ?self.state, visible = self.visible.len(), "filter transition");

        FilterOutcome {
            event,
            visible: self.visible.clone(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> FilterState {
        self.state
    }

    #[must_use]
    pub fn select_all_active(&self) -> bool {
        self.state == FilterState::SelectAllActive
    }

    /// Whether a tag checkbox is currently checked
    #[must_use]
    pub fn is_checked(&self, category: &CategoryKey, tag: &TagKey) -> bool {
        self.selection.contains(category, tag)
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    #[must_use]
    pub const fn config(&self) -> &FilterConfig {
        &self.config
    }

    #[must_use]
    pub const fn no_results(&self) -> Option<&NoResultsPanel> {
        self.no_results.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::color_size_catalog;

    fn controller(items: &[Item]) -> FilterController {
        FilterController::new(
            FilterConfig::default(),
            items,
            Some(NoResultsPanel::new("No products found")),
        )
    }

    #[test]
    fn test_initial_state() {
        let items = color_size_catalog();
        let filter = controller(&items);
        assert_eq!(filter.state(), FilterState::SelectAllActive);
        assert!(filter.selection().is_empty());
        assert_eq!(filter.visible().len(), items.len());
        assert!(!filter.no_results().unwrap().shown);
    }

    #[test]
    fn test_toggle_on_leaves_select_all() {
        let items = color_size_catalog();
        let mut filter = controller(&items);

        let outcome = filter.toggle(&items, "color", "red", true);
        assert!(!filter.select_all_active());
        assert!(filter.is_checked(&"color".into(), &"red".into()));
        assert!(matches!(
            outcome.event,
            FilterEvent::FilterApplied { visible_count: 6, .. }
        ));
        assert_eq!(outcome.visible.len(), 6);
    }

    #[test]
    fn test_toggle_last_tag_off_restores_select_all() {
        let items = color_size_catalog();
        let mut filter = controller(&items);

        filter.toggle(&items, "color", "red", true);
        filter.toggle(&items, "size", "S", true);
        filter.toggle(&items, "color", "red", false);
        assert_eq!(filter.state(), FilterState::PartialSelection);

        let outcome = filter.toggle(&items, "size", "S", false);
        assert_eq!(filter.state(), FilterState::SelectAllActive);
        assert_eq!(filter.selection(), &Selection::new());
        assert_eq!(outcome.event, FilterEvent::FilterCleared);
        assert_eq!(outcome.visible.len(), items.len());
    }

    #[test]
    fn test_activate_select_all_clears_selection() {
        let items = color_size_catalog();
        let mut filter = controller(&items);

        filter.toggle(&items, "color", "blue", true);
        let outcome = filter.activate_select_all(&items);
        assert!(filter.select_all_active());
        assert!(!filter.is_checked(&"color".into(), &"blue".into()));
        assert_eq!(outcome.event, FilterEvent::FilterCleared);
    }

    #[test]
    fn test_no_results_panel_follows_visible_count() {
        let items = color_size_catalog();
        let mut filter = controller(&items);

        filter.toggle(&items, "color", "green", true);
        assert!(filter.visible().is_empty());
        assert!(filter.no_results().unwrap().shown);

        filter.toggle(&items, "color", "green", false);
        assert!(!filter.no_results().unwrap().shown);
    }

    #[test]
    fn test_missing_panel_is_a_no_op() {
        let items = color_size_catalog();
        let mut filter = FilterController::new(FilterConfig::default(), &items, None);
        filter.toggle(&items, "color", "green", true);
        assert!(filter.no_results().is_none());
        assert!(filter.visible().is_empty());
    }

    #[test]
    fn test_reapplying_selection_is_idempotent() {
        let items = color_size_catalog();
        let mut filter = controller(&items);

        let first = filter.toggle(&items, "size", "M", true);
        let second = filter.toggle(&items, "size", "M", true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unchecking_unselected_tag_keeps_state() {
        let items = color_size_catalog();
        let mut filter = controller(&items);

        let outcome = filter.toggle(&items, "size", "XL", false);
        assert!(filter.select_all_active());
        assert_eq!(outcome.event, FilterEvent::FilterCleared);
    }
}
