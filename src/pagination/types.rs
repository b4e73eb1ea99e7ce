//! Pagination styles and strategies

use crate::config::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How pagination is presented, as configured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaginationStyle {
    /// Numbered page links with prev/next
    #[default]
    Default,
    /// Prev/next with a "Page X of Y" line
    PreviousNext,
    /// A single "Load More" button
    LoadMore,
}

impl PaginationStyle {
    /// Strategy this style drives
    #[must_use]
    pub const fn strategy(self) -> Strategy {
        match self {
            Self::Default | Self::PreviousNext => Strategy::Indexed,
            Self::LoadMore => Strategy::Incremental,
        }
    }
}

impl FromStr for PaginationStyle {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "numbered" => Ok(Self::Default),
            "previous-next" | "prev-next" => Ok(Self::PreviousNext),
            "load-more" => Ok(Self::LoadMore),
            _ => Err(ParseError::InvalidStyle(s.to_string())),
        }
    }
}

impl fmt::Display for PaginationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::PreviousNext => f.write_str("previous-next"),
            Self::LoadMore => f.write_str("load-more"),
        }
    }
}

/// Pagination mechanics currently in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Exactly one page is shown at a time
    Indexed,
    /// Pages `1..=revealed` are shown
    Incremental,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indexed => f.write_str("indexed"),
            Self::Incremental => f.write_str("incremental"),
        }
    }
}
