//! Filter evaluation
//!
//! Pure query over item tags. Given a selection and the container's
//! operators, decides whether each item matches:
//!
//! 1. An empty selection matches every item ("show all").
//! 2. Each category with chosen tags yields one boolean per item: with `Or`
//!    the item must carry any chosen tag of the category, with `And` all of
//!    them. An item without tags in that category does not match it.
//! 3. The per-category booleans combine under the between-categories
//!    operator. Categories without chosen tags impose no constraint.
//!
//! # Iterator Adapter
//!
//! [`ItemFilterExt`] adds the same evaluation to any iterator of items:
//!
//! ```ignore
//! use facetgrid::filters::engine::ItemFilterExt;
//!
//! let visible = items.iter().matching(&selection, &config);
//! ```

use super::types::{FilterConfig, Selection, VisibleSet};
use crate::item::Item;
use crate::tags::ItemTags;

/// Whether one item's tags satisfy `selection`
#[must_use]
pub fn evaluate(selection: &Selection, tags: &ItemTags, config: &FilterConfig) -> bool {
    if selection.is_empty() {
        return true;
    }

    let per_category = selection.active_categories().map(|(category, chosen)| {
        let carried = chosen.iter().map(|tag| tags.has(category, tag));
        config.within(category).combine(carried)
    });

    config.between_categories.combine(per_category)
}

/// Evaluate every item, returning the indices of those that match
#[must_use]
pub fn evaluate_all<'a>(
    selection: &Selection,
    items: impl IntoIterator<Item = &'a Item>,
    config: &FilterConfig,
) -> VisibleSet {
    items
        .into_iter()
        .filter(|item| evaluate(selection, &item.tags, config))
        .map(|item| item.index)
        .collect()
}

/// Extension trait for evaluating a selection over iterators of items
pub trait ItemFilterExt<'a>: IntoIterator<Item = &'a Item> + Sized {
    /// Indices of the items matching `selection`
    fn matching(self, selection: &Selection, config: &FilterConfig) -> VisibleSet {
        evaluate_all(selection, self, config)
    }
}

impl<'a, I> ItemFilterExt<'a> for I where I: IntoIterator<Item = &'a Item> {}
