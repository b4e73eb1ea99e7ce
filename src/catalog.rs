//! Catalog files
//!
//! A catalog describes the rendered items of one container: their index,
//! title and raw tag strings per category, plus optional category titles and
//! logic overrides. TOML and JSON are supported, chosen by file extension.
//!
//! ```toml
//! [categories.color]
//! title = "Colour"
//! logic = "or"
//!
//! [[items]]
//! title = "Linen shirt"
//! tags = "Sale"
//! categories = { color = "Red, Dark Blue", size = "M" }
//! ```
//!
//! Items without an explicit `index` take their position in the file.
//! Categories of an item are ordered by name.

use crate::config::{ContainerConfig, ParseError};
use crate::filters::Operator;
use crate::item::RawItem;
use crate::tags::CategoryKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// Two items claim the same index
    #[error("Duplicate item index: {0}")]
    DuplicateIndex(usize),

    /// A category logic value is not an operator
    #[error("Invalid category settings: {0}")]
    Parse(#[from] ParseError),
}

/// Category settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    #[serde(default)]
    pub title: Option<String>,

    /// Within-category operator for this category
    #[serde(default)]
    pub logic: Option<String>,
}

/// One rendered item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub index: Option<usize>,

    #[serde(default)]
    pub title: Option<String>,

    /// Uncategorized tags, comma separated
    #[serde(default)]
    pub tags: String,

    /// Serialized whole-item keys, whitespace and/or comma separated
    #[serde(default)]
    pub key_list: String,

    /// Comma-separated tag labels by category
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: BTreeMap<String, CategorySpec>,

    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

impl Catalog {
    /// Read a catalog file (`.json` as JSON, anything else as TOML)
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_toml_str(&contents)?
        };

        tracing::debug!(path = %path.display(), items = catalog.items.len(), "catalog loaded");
        Ok(catalog)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Toml` on malformed input.
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(contents)?)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Json` on malformed input.
    pub fn from_json_str(contents: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Items as rendered, with indices resolved
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateIndex` if two items share an index.
    pub fn raw_items(&self) -> Result<Vec<RawItem>, CatalogError> {
        let mut seen = BTreeSet::new();
        self.items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                let index = item.index.unwrap_or(position);
                if !seen.insert(index) {
                    return Err(CatalogError::DuplicateIndex(index));
                }

                let mut raw = RawItem::new(index)
                    .tags(item.tags.clone())
                    .key_list(item.key_list.clone());
                raw.label.clone_from(&item.title);
                for (category, labels) in &item.categories {
                    raw = raw.category(category.clone(), labels.clone());
                }
                Ok(raw)
            })
            .collect()
    }

    /// Merge category titles and logic into `config`
    ///
    /// Values already present in `config` win.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if a category logic is not an operator.
    pub fn apply_to(&self, config: &mut ContainerConfig) -> Result<(), CatalogError> {
        for (key, category) in &self.categories {
            if let Some(title) = &category.title {
                config
                    .category_titles
                    .entry(key.clone())
                    .or_insert_with(|| title.clone());
            }
            if let Some(logic) = &category.logic {
                let operator: Operator = logic.parse()?;
                config
                    .category_logic_overrides
                    .entry(CategoryKey::new(key.as_str()))
                    .or_insert(operator);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use std::io::Write;

    const CATALOG: &str = r#"
[categories.color]
title = "Colour"
logic = "and"

[[items]]
title = "Linen shirt"
tags = "Sale"
categories = { color = "Red, Dark Blue", size = "M" }

[[items]]
title = "Wool coat"
categories = { color = "Red" }

[[items]]
index = 7
title = "Scarf"
"#;

    #[test]
    fn test_parse_toml_catalog() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        assert_eq!(catalog.items.len(), 3);

        let raw = catalog.raw_items().unwrap();
        let indices: Vec<usize> = raw.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 7]);
        assert_eq!(raw[0].label.as_deref(), Some("Linen shirt"));
        assert_eq!(
            raw[0].categories,
            vec![
                ("color".to_string(), "Red, Dark Blue".to_string()),
                ("size".to_string(), "M".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicate_index_is_rejected() {
        let catalog = Catalog::from_toml_str(
            "[[items]]\ntitle = \"a\"\n\n[[items]]\nindex = 0\ntitle = \"b\"\n",
        )
        .unwrap();
        assert!(matches!(
            catalog.raw_items(),
            Err(CatalogError::DuplicateIndex(0))
        ));
    }

    #[test]
    fn test_apply_to_config_keeps_existing_values() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let mut config = ContainerConfig::default();
        config
            .category_logic_overrides
            .insert(CategoryKey::new("size"), Operator::Or);

        catalog.apply_to(&mut config).unwrap();
        assert_eq!(config.category_title("color"), "Colour");
        assert_eq!(
            config.category_logic_overrides.get(&CategoryKey::new("color")),
            Some(&Operator::And)
        );

        let mut titled = ContainerConfig::default();
        titled
            .category_titles
            .insert("color".to_string(), "Shade".to_string());
        catalog.apply_to(&mut titled).unwrap();
        assert_eq!(titled.category_title("color"), "Shade");
    }

    #[test]
    fn test_invalid_category_logic() {
        let catalog = Catalog::from_toml_str("[categories.size]\nlogic = \"xor\"\n").unwrap();
        let result = catalog.apply_to(&mut ContainerConfig::default());
        assert!(matches!(
            result,
            Err(CatalogError::Parse(ParseError::InvalidOperator(_)))
        ));
    }

    #[test]
    fn test_load_json_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"items": [{"tags": "Sale, New"}, {"categories": {"size": "S"}}]}"#)
            .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.items.len(), 2);
        assert_eq!(catalog.items[0].tags, "Sale, New");
    }

    #[test]
    fn test_key_list_reaches_raw_items() {
        let catalog =
            Catalog::from_toml_str("[[items]]\nkey_list = \"Sale  color-Red,size-S\"\n").unwrap();
        let raw = catalog.raw_items().unwrap();
        assert_eq!(raw[0].key_list, "Sale  color-Red,size-S");

        let item = Item::from(&raw[0]);
        assert_eq!(item.tags.flat_keys(), vec!["Sale", "color-Red", "size-S"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load("/nonexistent/catalog.toml");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = Catalog::from_toml_str("[[items]\n");
        assert!(matches!(result, Err(CatalogError::Toml(_))));
    }
}
