//! Container-wide tag listing
//!
//! Aggregates the tags of every item into the per-category listing that the
//! filter navigation presents: categories and tags in first-seen order, each
//! tag with the number of items carrying it.

use super::types::{CategoryKey, Tag, TagKey};
use crate::item::Item;
use serde::Serialize;
use std::collections::BTreeMap;

/// A tag together with how many items carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: Tag,
    pub items: usize,
}

/// One category of the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryListing {
    pub key: CategoryKey,
    pub title: String,
    pub tags: Vec<TagCount>,
}

impl CategoryListing {
    #[must_use]
    pub fn get(&self, key: &TagKey) -> Option<&TagCount> {
        self.tags.iter().find(|t| &t.tag.key == key)
    }
}

/// Read-only tag listing for a set of items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagIndex {
    categories: Vec<CategoryListing>,
}

impl TagIndex {
    /// Build the listing
    ///
    /// `titles` maps category keys to display titles; a category without a
    /// title is shown under its key.
    #[must_use]
    pub fn build<'a>(
        items: impl IntoIterator<Item = &'a Item>,
        titles: &BTreeMap<String, String>,
    ) -> Self {
        let mut categories: Vec<CategoryListing> = Vec::new();

        for item in items {
            for (category, set) in item.tags.categories() {
                let existing = categories.iter().position(|c| &c.key == category);
                let position = if let Some(pos) = existing {
                    pos
                } else {
                    categories.push(CategoryListing {
                        key: category.clone(),
                        title: titles
                            .get(category.as_str())
                            .cloned()
                            .unwrap_or_else(|| category.to_string()),
                        tags: Vec::new(),
                    });
                    categories.len() - 1
                };

                let listing = &mut categories[position];
                for tag in set.iter() {
                    if let Some(entry) = listing.tags.iter_mut().find(|t| t.tag.key == tag.key) {
                        entry.items += 1;
                    } else {
                        listing.tags.push(TagCount {
                            tag: tag.clone(),
                            items: 1,
                        });
                    }
                }
            }
        }

        Self { categories }
    }

    pub fn categories(&self) -> impl Iterator<Item = &CategoryListing> {
        self.categories.iter()
    }

    #[must_use]
    pub fn category(&self, key: &CategoryKey) -> Option<&CategoryListing> {
        self.categories.iter().find(|c| &c.key == key)
    }

    /// Whether `tag` exists anywhere in `category`
    #[must_use]
    pub fn contains(&self, category: &CategoryKey, tag: &TagKey) -> bool {
        self.category(category).is_some_and(|c| c.get(tag).is_some())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::RawItem;

    #[test]
    fn test_build_counts_and_order() {
        let items: Vec<Item> = vec![
            RawItem::new(0).category("color", "Red").category("size", "S").into(),
            RawItem::new(1).category("size", "M, S").category("color", "Blue, Red").into(),
            RawItem::new(2).tags("Sale").into(),
        ];
        let mut titles = BTreeMap::new();
        titles.insert("color".to_string(), "Colour".to_string());

        let index = TagIndex::build(&items, &titles);
        let keys: Vec<&str> = index.categories().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["color", "size", "general"]);

        let color = index.category(&"color".into()).unwrap();
        assert_eq!(color.title, "Colour");
        assert_eq!(color.get(&"Red".into()).unwrap().items, 2);
        assert_eq!(color.get(&"Blue".into()).unwrap().items, 1);

        let size = index.category(&"size".into()).unwrap();
        assert_eq!(size.title, "size");
        let sizes: Vec<&str> = size.tags.iter().map(|t| t.tag.key.as_str()).collect();
        assert_eq!(sizes, vec!["S", "M"]);

        assert!(index.contains(&CategoryKey::general(), &"Sale".into()));
        assert!(!index.contains(&"color".into(), &"Green".into()));
    }

    #[test]
    fn test_build_without_items() {
        let index = TagIndex::build(&Vec::<Item>::new(), &BTreeMap::new());
        assert!(index.is_empty());
    }
}
