//! Command-line interface definitions and parsing
//!
//! The binary drives a single container headlessly: it loads a catalog,
//! applies checkbox selections and page navigation in order, and prints the
//! resulting grid state.
//!
//! # Commands
//!
//! - **show**: filter and paginate a catalog, print the shown items (default)
//! - **tags**: list categories and tags with item counts
//! - **config**: print the effective configuration as TOML
//!
//! # Examples
//!
//! ```text
//! facetgrid show -c catalog.toml -s color=Red -s size=S --page 2
//! facetgrid show -c catalog.toml --config grid.toml --reveal 1 --json
//! facetgrid tags -c catalog.toml
//! ```

use crate::tags::{CategoryKey, TagKey, normalize_label};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "facetgrid")]
#[command(about = "Faceted filtering and pagination for catalog grids", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Only print item indices
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print machine-readable JSON
    #[arg(long = "json", global = true)]
    pub json: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Filter and paginate a catalog
    #[command(visible_alias = "s")]
    Show {
        /// Catalog file (TOML, or JSON by extension)
        #[arg(short = 'c', long = "catalog", value_name = "FILE")]
        catalog: PathBuf,

        /// Container configuration file (TOML)
        #[arg(long = "config", value_name = "FILE")]
        config: Option<PathBuf>,

        /// Check a tag checkbox, in order (repeatable). A bare TAG selects
        /// from the general category.
        #[arg(short = 's', long = "select", value_name = "CATEGORY=TAG")]
        select: Vec<String>,

        /// Go to this page (indexed pagination)
        #[arg(short = 'p', long = "page", value_name = "N")]
        page: Option<usize>,

        /// Press "Load More" this many times (incremental pagination)
        #[arg(short = 'r', long = "reveal", value_name = "N", default_value_t = 0)]
        reveal: usize,

        /// Also list items that are not shown
        #[arg(short = 'a', long = "all")]
        all: bool,
    },

    /// List categories and tags with item counts
    #[command(visible_alias = "t")]
    Tags {
        #[arg(short = 'c', long = "catalog", value_name = "FILE")]
        catalog: PathBuf,

        /// Container configuration file, for category titles
        #[arg(long = "config", value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config {
        #[arg(long = "config", value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Parse a `CATEGORY=TAG` selection argument
///
/// The tag part is normalized like a rendered label, so `color=Dark Blue`
/// selects the `Dark-Blue` key. Without `=` the tag belongs to the general
/// category. Returns `None` when the tag is blank.
#[must_use]
pub fn parse_selection(raw: &str) -> Option<(CategoryKey, TagKey)> {
    let (category, tag) = match raw.split_once('=') {
        Some((category, tag)) if !category.trim().is_empty() => {
            (CategoryKey::new(category.trim()), tag)
        }
        Some((_, tag)) => (CategoryKey::general(), tag),
        None => (CategoryKey::general(), raw),
    };
    normalize_label(tag).map(|tag| (category, tag.key))
}
