//! Catalog items as seen by the filter and pagination core
//!
//! A `RawItem` is what the rendering side hands over: a stable index, raw tag
//! strings per category and an optional display label. It is normalized once
//! into an `Item`, whose only mutable field is `currently_visible`.

use crate::tags::{CategoryKey, ItemTags, parse_key_list, parse_labels};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable ordinal position of an item within its container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemIndex(pub usize);

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item data as rendered, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    pub index: usize,

    /// Display label (title) of the item
    #[serde(default)]
    pub label: Option<String>,

    /// Uncategorized tags, comma separated
    #[serde(default)]
    pub tags: String,

    /// Serialized whole-item keys, whitespace and/or comma separated.
    /// Merged into the general category.
    #[serde(default)]
    pub key_list: String,

    /// Raw comma-separated tag labels per category, in render order
    #[serde(default)]
    pub categories: Vec<(String, String)>,
}

impl RawItem {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn tags(mut self, raw: impl Into<String>) -> Self {
        self.tags = raw.into();
        self
    }

    #[must_use]
    pub fn key_list(mut self, raw: impl Into<String>) -> Self {
        self.key_list = raw.into();
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>, raw: impl Into<String>) -> Self {
        self.categories.push((category.into(), raw.into()));
        self
    }
}

/// A normalized item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub index: ItemIndex,
    pub label: Option<String>,
    pub tags: ItemTags,
    /// Matches the current selection and falls within the revealed pages.
    /// Written only by the pagination controller.
    pub currently_visible: bool,
}

impl Item {
    #[must_use]
    pub fn new(index: ItemIndex, tags: ItemTags) -> Self {
        Self {
            index,
            label: None,
            tags,
            currently_visible: false,
        }
    }
}

impl From<&RawItem> for Item {
    fn from(raw: &RawItem) -> Self {
        let mut tags = ItemTags::new();
        tags.extend_category(CategoryKey::general(), parse_labels(&raw.tags));
        tags.extend_category(CategoryKey::general(), parse_key_list(&raw.key_list));
        for (category, labels) in &raw.categories {
            let category = category.trim();
            if category.is_empty() {
                continue;
            }
            tags.extend_category(CategoryKey::new(category), parse_labels(labels));
        }

        Self {
            index: ItemIndex(raw.index),
            label: raw.label.as_ref().map(|l| l.trim().to_string()).filter(|l| !l.is_empty()),
            tags,
            currently_visible: false,
        }
    }
}

impl From<RawItem> for Item {
    fn from(raw: RawItem) -> Self {
        Self::from(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagKey;

    #[test]
    fn test_item_from_raw() {
        let raw = RawItem::new(3)
            .label(" Linen shirt ")
            .tags("Sale, New Arrival")
            .category("color", "Red, Dark Blue")
            .category("size", " ");

        let item = Item::from(&raw);
        assert_eq!(item.index, ItemIndex(3));
        assert_eq!(item.label.as_deref(), Some("Linen shirt"));
        assert!(item.tags.has(&CategoryKey::general(), &TagKey::new("New-Arrival")));
        assert!(item.tags.has(&"color".into(), &"Dark-Blue".into()));
        assert!(item.tags.get(&"size".into()).is_none());
        assert!(!item.currently_visible);
    }

    #[test]
    fn test_key_list_merges_into_general() {
        let raw = RawItem::new(1)
            .tags("Sale")
            .key_list("Sale New-Arrival,size-S");
        let item = Item::from(raw);
        let keys: Vec<&str> = item
            .tags
            .get(&CategoryKey::general())
            .unwrap()
            .keys()
            .map(TagKey::as_str)
            .collect();
        assert_eq!(keys, vec!["Sale", "New-Arrival", "size-S"]);
    }

    #[test]
    fn test_blank_category_name_is_ignored() {
        let item = Item::from(RawItem::new(0).category("  ", "Red"));
        assert!(item.tags.is_empty());
    }
}
