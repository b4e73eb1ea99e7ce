//! Filter data structures and types
//!
//! - `Operator`: AND/OR combination logic
//! - `FilterConfig`: between-category and within-category operators
//! - `Category`: a tag category with its resolved within-category operator
//! - `Selection`: chosen tags grouped by category
//! - `VisibleSet`: ordered set of matching item indices

use crate::config::ParseError;
use crate::item::ItemIndex;
use crate::tags::{CategoryKey, TagKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Boolean combination operator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Every operand must match
    And,
    /// At least one operand must match
    Or,
}

impl Operator {
    /// Combine boolean operands under this operator
    ///
    /// An empty operand list is vacuously true for `And` and false for `Or`;
    /// the filter engine never calls this with an empty list.
    pub fn combine(self, mut operands: impl Iterator<Item = bool>) -> bool {
        match self {
            Self::And => operands.all(|b| b),
            Self::Or => operands.any(|b| b),
        }
    }
}

impl FromStr for Operator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" | "all" => Ok(Self::And),
            "or" | "any" => Ok(Self::Or),
            _ => Err(ParseError::InvalidOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
        }
    }
}

/// Operators governing one container's filter evaluation
///
/// Immutable for the lifetime of a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// How per-category results combine
    pub between_categories: Operator,

    /// How chosen tags within one category combine
    pub within_category: Operator,

    /// Per-category overrides of `within_category`
    #[serde(default)]
    pub category_overrides: BTreeMap<CategoryKey, Operator>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            between_categories: Operator::And,
            within_category: Operator::Or,
            category_overrides: BTreeMap::new(),
        }
    }
}

impl FilterConfig {
    #[must_use]
    pub fn new(between_categories: Operator, within_category: Operator) -> Self {
        Self {
            between_categories,
            within_category,
            category_overrides: BTreeMap::new(),
        }
    }

    /// Override the within-category operator of one category
    #[must_use]
    pub fn with_override(mut self, category: impl Into<CategoryKey>, operator: Operator) -> Self {
        self.category_overrides.insert(category.into(), operator);
        self
    }

    /// Resolve the within-category operator of `category`
    #[must_use]
    pub fn within(&self, category: &CategoryKey) -> Operator {
        self.category_overrides
            .get(category)
            .copied()
            .unwrap_or(self.within_category)
    }
}

/// A tag category as configured for a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub key: CategoryKey,
    pub title: String,
    pub within: Operator,
}

/// User-chosen tags grouped by category
///
/// Categories never hold an empty tag set: removing the last tag of a
/// category removes the category, so an empty `Selection` is exactly the
/// "no filter active" state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    chosen: BTreeMap<CategoryKey, BTreeSet<TagKey>>,
}

impl Selection {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chosen: BTreeMap::new(),
        }
    }

    /// Add a tag, returning false if it was already chosen
    pub fn insert(&mut self, category: CategoryKey, tag: TagKey) -> bool {
        self.chosen.entry(category).or_default().insert(tag)
    }

    /// Remove a tag, returning false if it was not chosen
    pub fn remove(&mut self, category: &CategoryKey, tag: &TagKey) -> bool {
        let Some(tags) = self.chosen.get_mut(category) else {
            return false;
        };
        let removed = tags.remove(tag);
        if tags.is_empty() {
            self.chosen.remove(category);
        }
        removed
    }

    #[must_use]
    pub fn contains(&self, category: &CategoryKey, tag: &TagKey) -> bool {
        self.chosen.get(category).is_some_and(|tags| tags.contains(tag))
    }

    /// Categories with at least one chosen tag
    pub fn active_categories(&self) -> impl Iterator<Item = (&CategoryKey, &BTreeSet<TagKey>)> {
        self.chosen.iter().filter(|(_, tags)| !tags.is_empty())
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chosen.values().all(BTreeSet::is_empty)
    }

    /// Total number of chosen tags across categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.chosen.values().map(BTreeSet::len).sum()
    }
}

impl<C: Into<CategoryKey>, T: Into<TagKey>> FromIterator<(C, T)> for Selection {
    fn from_iter<I: IntoIterator<Item = (C, T)>>(iter: I) -> Self {
        let mut selection = Self::new();
        for (category, tag) in iter {
            selection.insert(category.into(), tag.into());
        }
        selection
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(all)");
        }
        let groups: Vec<String> = self
            .active_categories()
            .map(|(category, tags)| {
                let tags: Vec<&str> = tags.iter().map(TagKey::as_str).collect();
                format!("{category}: {}", tags.join(", "))
            })
            .collect();
        f.write_str(&groups.join("; "))
    }
}

/// Ordered set of item indices matching the active selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VisibleSet {
    indices: Vec<ItemIndex>,
}

impl VisibleSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn contains(&self, index: ItemIndex) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ItemIndex] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemIndex> + '_ {
        self.indices.iter().copied()
    }
}

impl FromIterator<ItemIndex> for VisibleSet {
    fn from_iter<I: IntoIterator<Item = ItemIndex>>(iter: I) -> Self {
        let mut indices: Vec<ItemIndex> = iter.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_parse() {
        assert_eq!("and".parse::<Operator>().unwrap(), Operator::And);
        assert_eq!(" OR ".parse::<Operator>().unwrap(), Operator::Or);
        assert_eq!("any".parse::<Operator>().unwrap(), Operator::Or);
        assert!("xor".parse::<Operator>().is_err());
    }

    #[test]
    fn test_operator_combine() {
        assert!(Operator::And.combine([true, true].into_iter()));
        assert!(!Operator::And.combine([true, false].into_iter()));
        assert!(Operator::Or.combine([false, true].into_iter()));
        assert!(!Operator::Or.combine([false, false].into_iter()));
    }

    #[test]
    fn test_filter_config_defaults_and_overrides() {
        let config = FilterConfig::default().with_override("size", Operator::And);
        assert_eq!(config.between_categories, Operator::And);
        assert_eq!(config.within(&"color".into()), Operator::Or);
        assert_eq!(config.within(&"size".into()), Operator::And);
    }

    #[test]
    fn test_selection_remove_last_tag_drops_category() {
        let mut selection = Selection::new();
        assert!(selection.insert("color".into(), "red".into()));
        assert!(!selection.insert("color".into(), "red".into()));
        assert_eq!(selection.len(), 1);

        assert!(selection.remove(&"color".into(), &"red".into()));
        assert!(selection.is_empty());
        assert_eq!(selection, Selection::new());
        assert!(!selection.remove(&"color".into(), &"red".into()));
    }

    #[test]
    fn test_selection_display() {
        let selection: Selection = [("color", "red"), ("color", "blue"), ("size", "S")]
            .into_iter()
            .collect();
        assert_eq!(selection.to_string(), "color: blue, red; size: S");
        assert_eq!(Selection::new().to_string(), "(all)");
    }

    #[test]
    fn test_visible_set_is_sorted_and_unique() {
        let set: VisibleSet = [ItemIndex(4), ItemIndex(1), ItemIndex(4)].into_iter().collect();
        assert_eq!(set.as_slice(), &[ItemIndex(1), ItemIndex(4)]);
        assert!(set.contains(ItemIndex(4)));
        assert!(!set.contains(ItemIndex(2)));
    }
}
