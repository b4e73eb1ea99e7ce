//! Tag data structures
//!
//! - `TagKey` / `CategoryKey`: key-safe identifiers used for matching
//! - `Tag`: a key with the label it was derived from
//! - `TagSet`: ordered, de-duplicated set of tags
//! - `ItemTags`: an item's ordered category → tag set mapping

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category that holds tags not assigned to a named category
pub const GENERAL_CATEGORY: &str = "general";

/// Key-safe tag identifier (internal whitespace collapsed to `-`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagKey(String);

impl TagKey {
    /// Build a key from an already key-safe token
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TagKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Category identifier (e.g. `color`, `size`, `general`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The implicit category for uncategorized tags
    #[must_use]
    pub fn general() -> Self {
        Self(GENERAL_CATEGORY.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_general(&self) -> bool {
        self.0 == GENERAL_CATEGORY
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A normalized tag with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: TagKey,
    pub label: String,
}

/// Ordered set of tags, unique by key
///
/// Insertion order is kept; a second tag with an existing key is ignored
/// (the first label wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Insert a tag, returning false if its key was already present
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.contains(&tag.key) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    #[must_use]
    pub fn contains(&self, key: &TagKey) -> bool {
        self.tags.iter().any(|t| &t.key == key)
    }

    #[must_use]
    pub fn get(&self, key: &TagKey) -> Option<&Tag> {
        self.tags.iter().find(|t| &t.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &TagKey> {
        self.tags.iter().map(|t| &t.key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// An item's tags grouped by category, in first-seen category order
///
/// Categories whose raw tag string normalized to nothing are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTags {
    categories: Vec<(CategoryKey, TagSet)>,
}

impl ItemTags {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Merge a tag set into a category, creating the category if needed
    pub fn extend_category(&mut self, category: CategoryKey, tags: TagSet) {
        if tags.is_empty() {
            return;
        }
        if let Some((_, existing)) = self.categories.iter_mut().find(|(k, _)| *k == category) {
            for tag in tags.tags {
                existing.insert(tag);
            }
        } else {
            self.categories.push((category, tags));
        }
    }

    #[must_use]
    pub fn get(&self, category: &CategoryKey) -> Option<&TagSet> {
        self.categories
            .iter()
            .find(|(k, _)| k == category)
            .map(|(_, set)| set)
    }

    /// Whether the item carries `tag` in `category`
    #[must_use]
    pub fn has(&self, category: &CategoryKey, tag: &TagKey) -> bool {
        self.get(category).is_some_and(|set| set.contains(tag))
    }

    pub fn categories(&self) -> impl Iterator<Item = (&CategoryKey, &TagSet)> {
        self.categories.iter().map(|(k, set)| (k, set))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Flat whole-item key list
    ///
    /// General tags keep their key; categorized tags are prefixed with
    /// their category (`color-Red`).
    #[must_use]
    pub fn flat_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        for (category, set) in &self.categories {
            for key in set.keys() {
                let flat = if category.is_general() {
                    key.to_string()
                } else {
                    format!("{category}-{key}")
                };
                if !keys.contains(&flat) {
                    keys.push(flat);
                }
            }
        }
        keys
    }
}
