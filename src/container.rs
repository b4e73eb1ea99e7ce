//! Per-instance container
//!
//! A [`Container`] owns everything one filterable grid needs: its items,
//! configuration, filter and pagination controllers, transition scheduler
//! and listeners. Nothing is shared between containers, and every operation
//! acts on the instance it is called on.
//!
//! Each external interaction runs synchronously to completion:
//!
//! 1. the filter controller updates the selection and evaluates the visible set
//! 2. the pagination controller repaginates and applies item visibility
//! 3. external listeners receive the notification
//!
//! Visual transitions started along the way progress only through
//! [`Container::advance`].

use crate::config::ContainerConfig;
use crate::filters::{
    Category, FilterController, FilterEvent, FilterState, ListenerId, Listeners, NoResultsPanel,
    Selection, VisibleSet,
};
use crate::item::{Item, ItemIndex, RawItem};
use crate::pagination::{ControlsView, PaginationController};
use crate::tags::{CategoryKey, TagIndex, TagKey};
use crate::transition::{FiredStep, ItemVisual, TransitionScheduler};
use serde::Serialize;
use std::time::Duration;

/// Builder for `Container`
///
/// ```
/// use facetgrid::config::ContainerConfig;
/// use facetgrid::container::Container;
/// use facetgrid::item::RawItem;
///
/// let mut container = Container::builder()
///     .config(ContainerConfig::from_attributes([("data-pagination", "true")]))
///     .raw_items([
///         RawItem::new(0).category("color", "Red"),
///         RawItem::new(1).category("color", "Blue"),
///     ])
///     .build();
///
/// container.toggle("color", "Red", true);
/// assert_eq!(container.visible_set().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    config: ContainerConfig,
    items: Vec<Item>,
    no_results_panel: bool,
    pagination_controls: bool,
}

impl ContainerBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
            items: Vec::new(),
            no_results_panel: true,
            pagination_controls: true,
        }
    }

    #[must_use]
    pub fn config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// Add normalized items
    #[must_use]
    pub fn items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    /// Add items as rendered, normalizing their tags
    #[must_use]
    pub fn raw_items(mut self, items: impl IntoIterator<Item = RawItem>) -> Self {
        self.items.extend(items.into_iter().map(Item::from));
        self
    }

    /// Whether the container has a no-results panel (default: yes)
    #[must_use]
    pub const fn no_results_panel(mut self, present: bool) -> Self {
        self.no_results_panel = present;
        self
    }

    /// Whether the container has a pagination control region (default: yes)
    #[must_use]
    pub const fn pagination_controls(mut self, present: bool) -> Self {
        self.pagination_controls = present;
        self
    }

    /// Build the container and lay out its initial page
    ///
    /// Items are ordered by index; when two items share an index the first
    /// one added is kept.
    #[must_use]
    pub fn build(self) -> Container {
        let Self {
            config,
            mut items,
            no_results_panel,
            pagination_controls,
        } = self;

        items.sort_by_key(|item| item.index);
        let before = items.len();
        items.dedup_by_key(|item| item.index);
        if items.len() != before {
            tracing::warn!(dropped = before - items.len(), "dropping items with duplicate index");
        }

        let tag_index = TagIndex::build(&items, &config.category_titles);
        let filter_config = config.filter_config();
        let categories = tag_index
            .categories()
            .map(|listing| Category {
                key: listing.key.clone(),
                title: listing.title.clone(),
                within: filter_config.within(&listing.key),
            })
            .collect();

        let panel =
            no_results_panel.then(|| NoResultsPanel::new(config.no_results_message.clone()));
        let filter = FilterController::new(filter_config, &items, panel);

        let pagination = PaginationController::new(
            config.pagination_settings(pagination_controls),
            filter.visible(),
            items.len(),
        );
        let mut scheduler = TransitionScheduler::new(config.filter_animation);
        pagination.render(&mut items, &mut scheduler);

        tracing::debug!(
            items = items.len(),
            pages = pagination.total_pages(),
            strategy = %pagination.strategy(),
            "container built"
        );

        Container {
            config,
            items,
            tag_index,
            categories,
            filter,
            pagination,
            scheduler,
            listeners: Listeners::new(),
        }
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One filterable, paginated grid
#[derive(Debug)]
pub struct Container {
    config: ContainerConfig,
    items: Vec<Item>,
    tag_index: TagIndex,
    categories: Vec<Category>,
    filter: FilterController,
    pagination: PaginationController,
    scheduler: TransitionScheduler,
    listeners: Listeners,
}

impl Container {
    #[must_use]
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Check or uncheck a tag checkbox
    pub fn toggle(
        &mut self,
        category: impl Into<CategoryKey>,
        tag: impl Into<TagKey>,
        checked: bool,
    ) -> FilterEvent {
        let outcome = self.filter.toggle(&self.items, category, tag, checked);
        self.dispatch(&outcome.event, &outcome.visible);
        outcome.event
    }

    /// Check the "All" checkbox
    pub fn select_all(&mut self) -> FilterEvent {
        let outcome = self.filter.activate_select_all(&self.items);
        self.dispatch(&outcome.event, &outcome.visible);
        outcome.event
    }

    fn dispatch(&mut self, event: &FilterEvent, visible: &VisibleSet) {
        self.pagination
            .on_filter_event(event, visible, &mut self.items, &mut self.scheduler);
        self.listeners.emit(event);
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.pagination
            .go_to_page(page, &mut self.items, &mut self.scheduler)
    }

    pub fn next_page(&mut self) -> bool {
        self.pagination.next_page(&mut self.items, &mut self.scheduler)
    }

    pub fn previous_page(&mut self) -> bool {
        self.pagination
            .previous_page(&mut self.items, &mut self.scheduler)
    }

    /// Press "Load More"
    pub fn reveal_more(&mut self) -> bool {
        self.pagination.reveal_more(&mut self.items, &mut self.scheduler)
    }

    /// Advance transition time
    pub fn advance(&mut self, elapsed: Duration) -> Vec<FiredStep> {
        self.scheduler.advance(elapsed)
    }

    /// Run every pending transition to completion
    pub fn settle(&mut self) -> Vec<FiredStep> {
        self.scheduler.flush()
    }

    /// Register a filter listener
    pub fn subscribe(&mut self, callback: impl FnMut(&FilterEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, index: ItemIndex) -> Option<&Item> {
        self.items
            .binary_search_by_key(&index, |item| item.index)
            .ok()
            .map(|pos| &self.items[pos])
    }

    /// Items currently shown (matching and within the shown pages)
    pub fn shown_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.currently_visible)
    }

    /// Items matching the current selection, on any page
    #[must_use]
    pub const fn visible_set(&self) -> &VisibleSet {
        self.filter.visible()
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        self.filter.selection()
    }

    #[must_use]
    pub const fn filter_state(&self) -> FilterState {
        self.filter.state()
    }

    #[must_use]
    pub fn is_select_all(&self) -> bool {
        self.filter.select_all_active()
    }

    #[must_use]
    pub fn is_checked(&self, category: &CategoryKey, tag: &TagKey) -> bool {
        self.filter.is_checked(category, tag)
    }

    #[must_use]
    pub const fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    #[must_use]
    pub fn pagination_view(&self) -> ControlsView {
        self.pagination.view()
    }

    #[must_use]
    pub const fn no_results(&self) -> Option<&NoResultsPanel> {
        self.filter.no_results()
    }

    /// Whether the no-results panel is displayed
    #[must_use]
    pub fn no_results_shown(&self) -> bool {
        self.filter.no_results().is_some_and(|panel| panel.shown)
    }

    #[must_use]
    pub const fn tag_index(&self) -> &TagIndex {
        &self.tag_index
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub const fn config(&self) -> &ContainerConfig {
        &self.config
    }

    #[must_use]
    pub fn visual(&self, index: ItemIndex) -> ItemVisual {
        self.scheduler.visual(index)
    }

    #[must_use]
    pub const fn scheduler(&self) -> &TransitionScheduler {
        &self.scheduler
    }

    /// Serializable summary of the current state
    #[must_use]
    pub fn snapshot(&self) -> ContainerSnapshot {
        ContainerSnapshot {
            state: self.filter.state(),
            selection: self.filter.selection().clone(),
            matching: self.filter.visible().clone(),
            shown: self.shown_items().map(|item| item.index).collect(),
            total_pages: self.pagination.total_pages(),
            current_page: self.pagination.current_page(),
            revealed_page: self.pagination.revealed_page(),
            controls: self.pagination.view(),
            no_results: self.filter.no_results().cloned(),
        }
    }
}

/// Point-in-time view of a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSnapshot {
    pub state: FilterState,
    pub selection: Selection,
    pub matching: VisibleSet,
    pub shown: Vec<ItemIndex>,
    pub total_pages: usize,
    pub current_page: usize,
    pub revealed_page: usize,
    pub controls: ControlsView,
    pub no_results: Option<NoResultsPanel>,
}
