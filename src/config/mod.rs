//! Container configuration
//!
//! A container reads a small set of options once, when it is built. They can
//! come from a TOML file, from the rendered `data-*` attributes of the
//! container, or from [`ContainerConfig::default`].
//!
//! Loading never fails because of a bad value: unknown operators, styles or
//! page sizes are replaced by their defaults and a warning is logged. Only
//! an unreadable or syntactically broken file is an error.

mod error;

pub use error::{ConfigError, ParseError};

use crate::filters::{FilterConfig, Operator};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, PaginationSettings, PaginationStyle};
use crate::tags::CategoryKey;
use crate::transition::TransitionFamily;
use ::config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;

/// Message of the no-results panel when none is configured
pub const DEFAULT_NO_RESULTS_MESSAGE: &str = "No products found";

/// Effective, sanitized options of one container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawContainerConfig")]
pub struct ContainerConfig {
    /// How per-category results combine
    pub filter_logic: Operator,

    /// How chosen tags within one category combine
    pub category_logic: Operator,

    /// Show/hide transition family
    pub filter_animation: TransitionFamily,

    /// Whether pagination is enabled
    pub pagination: bool,

    pub items_per_page: NonZeroUsize,

    pub pagination_style: PaginationStyle,

    /// Present filtered results incrementally when the configured style is indexed
    pub restyle_on_filter: bool,

    pub no_results_message: String,

    /// Per-category overrides of `category_logic`
    pub category_logic_overrides: BTreeMap<CategoryKey, Operator>,

    /// Display titles of categories, by key
    pub category_titles: BTreeMap<String, String>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            filter_logic: Operator::And,
            category_logic: Operator::Or,
            filter_animation: TransitionFamily::Fade,
            pagination: false,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            pagination_style: PaginationStyle::Default,
            restyle_on_filter: true,
            no_results_message: DEFAULT_NO_RESULTS_MESSAGE.to_string(),
            category_logic_overrides: BTreeMap::new(),
            category_titles: BTreeMap::new(),
        }
    }
}

impl ContainerConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Build configuration from rendered container attributes
    ///
    /// Recognized names are `data-filter-logic`, `data-category-logic`,
    /// `data-filter-animation`, `data-pagination`, `data-items-per-page`,
    /// `data-pagination-style`, `data-restyle-on-filter` and
    /// `data-no-results-message`, plus `data-category-logic-<category>` and
    /// `data-category-title-<category>`. Anything else is ignored.
    pub fn from_attributes<K, V>(attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = RawContainerConfig::default();

        for (name, value) in attributes {
            let name = name.as_ref().trim().to_ascii_lowercase();
            let text = RawValue::Text(value.as_ref().to_string());

            match name.as_str() {
                "data-filter-logic" => raw.filter_logic = Some(text),
                "data-category-logic" => raw.category_logic = Some(text),
                "data-filter-animation" => raw.filter_animation = Some(text),
                "data-pagination" => raw.pagination = Some(text),
                "data-items-per-page" => raw.items_per_page = Some(text),
                "data-pagination-style" => raw.pagination_style = Some(text),
                "data-restyle-on-filter" => raw.restyle_on_filter = Some(text),
                "data-no-results-message" => raw.no_results_message = Some(text),
                other => {
                    if let Some(category) = other.strip_prefix("data-category-logic-") {
                        raw.category_logic_overrides.insert(category.to_string(), text);
                    } else if let Some(category) = other.strip_prefix("data-category-title-") {
                        raw.category_titles
                            .insert(category.to_string(), value.as_ref().trim().to_string());
                    } else {
                        tracing::trace!(attribute = other, "ignoring unknown attribute");
                    }
                }
            }
        }

        raw.into()
    }

    /// Serialize to TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Operators for the filter engine
    #[must_use]
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            between_categories: self.filter_logic,
            within_category: self.category_logic,
            category_overrides: self.category_logic_overrides.clone(),
        }
    }

    /// Pagination options, given whether the container has a control region
    ///
    /// Without a control region pagination is disabled.
    #[must_use]
    pub const fn pagination_settings(&self, has_controls: bool) -> PaginationSettings {
        PaginationSettings {
            enabled: self.pagination && has_controls,
            items_per_page: self.items_per_page,
            style: self.pagination_style,
            restyle_on_filter: self.restyle_on_filter,
        }
    }
}

/// A configuration value as written, before validation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl RawValue {
    fn to_operator(&self) -> Result<Operator, ParseError> {
        match self {
            Self::Text(s) => s.parse(),
            other => Err(ParseError::InvalidOperator(other.to_string())),
        }
    }

    fn to_style(&self) -> Result<PaginationStyle, ParseError> {
        match self {
            Self::Text(s) => s.parse(),
            other => Err(ParseError::InvalidStyle(other.to_string())),
        }
    }

    fn to_family(&self) -> TransitionFamily {
        TransitionFamily::from_token(&self.to_string())
    }

    fn to_flag(&self) -> Result<bool, ParseError> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Int(0) => Ok(false),
            Self::Int(1) => Ok(true),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" | "" => Ok(false),
                _ => Err(ParseError::InvalidFlag(s.clone())),
            },
            other => Err(ParseError::InvalidFlag(other.to_string())),
        }
    }

    fn to_items_per_page(&self) -> Result<NonZeroUsize, ParseError> {
        let invalid = || ParseError::InvalidItemsPerPage(self.to_string());
        let n = match self {
            Self::Int(n) => *n,
            Self::Text(s) => s.trim().parse::<i64>().map_err(|_| invalid())?,
            Self::Bool(_) | Self::Float(_) => return Err(invalid()),
        };
        usize::try_from(n)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(invalid)
    }
}

/// Unvalidated configuration, as deserialized
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawContainerConfig {
    filter_logic: Option<RawValue>,
    category_logic: Option<RawValue>,
    filter_animation: Option<RawValue>,
    pagination: Option<RawValue>,
    items_per_page: Option<RawValue>,
    pagination_style: Option<RawValue>,
    restyle_on_filter: Option<RawValue>,
    no_results_message: Option<RawValue>,
    category_logic_overrides: BTreeMap<String, RawValue>,
    category_titles: BTreeMap<String, String>,
}

/// Use the parsed value, or fall back to `default` with a warning
fn or_default<T: fmt::Display>(
    field: &str,
    parsed: Option<Result<T, ParseError>>,
    default: T,
) -> T {
    match parsed {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            tracing::warn!(field, error = %e, fallback = %default, "invalid configuration value");
            default
        }
        None => default,
    }
}

impl From<RawContainerConfig> for ContainerConfig {
    fn from(raw: RawContainerConfig) -> Self {
        let defaults = Self::default();

        let category_logic_overrides = raw
            .category_logic_overrides
            .into_iter()
            .filter_map(|(category, value)| match value.to_operator() {
                Ok(operator) => Some((CategoryKey::new(category), operator)),
                Err(e) => {
                    tracing::warn!(%category, error = %e, "ignoring category logic override");
                    None
                }
            })
            .collect();

        Self {
            filter_logic: or_default(
                "filter_logic",
                raw.filter_logic.as_ref().map(RawValue::to_operator),
                defaults.filter_logic,
            ),
            category_logic: or_default(
                "category_logic",
                raw.category_logic.as_ref().map(RawValue::to_operator),
                defaults.category_logic,
            ),
            filter_animation: raw
                .filter_animation
                .as_ref()
                .map_or(defaults.filter_animation, RawValue::to_family),
            pagination: or_default(
                "pagination",
                raw.pagination.as_ref().map(RawValue::to_flag),
                defaults.pagination,
            ),
            items_per_page: or_default(
                "items_per_page",
                raw.items_per_page.as_ref().map(RawValue::to_items_per_page),
                defaults.items_per_page,
            ),
            pagination_style: or_default(
                "pagination_style",
                raw.pagination_style.as_ref().map(RawValue::to_style),
                defaults.pagination_style,
            ),
            restyle_on_filter: or_default(
                "restyle_on_filter",
                raw.restyle_on_filter.as_ref().map(RawValue::to_flag),
                defaults.restyle_on_filter,
            ),
            no_results_message: raw
                .no_results_message
                .map(|v| v.to_string().trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.no_results_message),
            category_logic_overrides,
            category_titles: raw.category_titles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = ContainerConfig::default();
        assert_eq!(config.filter_logic, Operator::And);
        assert_eq!(config.category_logic, Operator::Or);
        assert_eq!(config.filter_animation, TransitionFamily::Fade);
        assert!(!config.pagination);
        assert_eq!(config.items_per_page.get(), 6);
        assert_eq!(config.pagination_style, PaginationStyle::Default);
        assert!(config.restyle_on_filter);
        assert_eq!(config.no_results_message, "No products found");
    }

    #[test]
    fn test_from_attributes() {
        let config = ContainerConfig::from_attributes([
            ("data-filter-logic", "or"),
            ("data-category-logic", "and"),
            ("data-filter-animation", "slide"),
            ("data-pagination", "true"),
            ("data-items-per-page", "4"),
            ("data-pagination-style", "load-more"),
            ("data-category-title-color", "Colour"),
            ("data-category-logic-size", "and"),
            ("class", "grid"),
        ]);

        assert_eq!(config.filter_logic, Operator::Or);
        assert_eq!(config.category_logic, Operator::And);
        assert_eq!(config.filter_animation, TransitionFamily::Slide);
        assert!(config.pagination);
        assert_eq!(config.items_per_page.get(), 4);
        assert_eq!(config.pagination_style, PaginationStyle::LoadMore);
        assert_eq!(
            config.category_titles.get("color").map(String::as_str),
            Some("Colour")
        );
        assert!(!config.category_titles.contains_key("size"));
        assert_eq!(
            config.category_logic_overrides.get(&CategoryKey::new("size")),
            Some(&Operator::And)
        );
    }

    #[test]
    fn test_invalid_items_per_page_falls_back() {
        for value in ["0", "-2", "abc", "", "2.5"] {
            let config = ContainerConfig::from_attributes([("data-items-per-page", value)]);
            assert_eq!(config.items_per_page.get(), 6, "value {value:?}");
        }
    }

    #[test]
    fn test_unknown_tokens_fall_back() {
        let config = ContainerConfig::from_attributes([
            ("data-filter-logic", "xor"),
            ("data-pagination-style", "infinite"),
            ("data-filter-animation", "spin"),
            ("data-category-logic-color", "nand"),
        ]);
        assert_eq!(config.filter_logic, Operator::And);
        assert_eq!(config.pagination_style, PaginationStyle::Default);
        assert_eq!(config.filter_animation, TransitionFamily::Plain);
        assert!(config.category_logic_overrides.is_empty());
    }

    #[test]
    fn test_load_toml_file() {
        let file = toml_file(
            r#"
filter_logic = "or"
pagination = true
items_per_page = 3
pagination_style = "previous-next"
no_results_message = "Nothing here"

[category_titles]
color = "Colour"
"#,
        );

        let config = ContainerConfig::load(file.path()).unwrap();
        assert_eq!(config.filter_logic, Operator::Or);
        assert!(config.pagination);
        assert_eq!(config.items_per_page.get(), 3);
        assert_eq!(config.pagination_style, PaginationStyle::PreviousNext);
        assert_eq!(config.no_results_message, "Nothing here");
        assert_eq!(
            config.category_titles.get("color").map(String::as_str),
            Some("Colour")
        );
    }

    #[test]
    fn test_load_sanitizes_bad_values() {
        let file = toml_file("items_per_page = -1\nfilter_logic = 5\n");
        let config = ContainerConfig::load(file.path()).unwrap();
        assert_eq!(config.items_per_page.get(), 6);
        assert_eq!(config.filter_logic, Operator::And);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ContainerConfig::load("/nonexistent/facetgrid.toml");
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ContainerConfig::from_attributes([
            ("data-pagination", "true"),
            ("data-items-per-page", "8"),
            ("data-category-logic-size", "and"),
        ]);
        let text = config.to_toml().unwrap();
        let parsed: ContainerConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_pagination_requires_controls() {
        let config = ContainerConfig::from_attributes([("data-pagination", "true")]);
        assert!(config.pagination_settings(true).enabled);
        assert!(!config.pagination_settings(false).enabled);
    }
}
