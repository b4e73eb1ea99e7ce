//! Configuration error types
//!
//! - **`ParseError`**: a single token (operator, style, page size, flag) could
//!   not be parsed. The lenient loading path turns these into defaults.
//! - **`ConfigError`**: a configuration file could not be read or written.

use thiserror::Error;

/// A configuration token that does not parse
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not one of `and`/`all`/`or`/`any`
    #[error("Invalid logic operator: {0}")]
    InvalidOperator(String),

    /// Not one of `default`/`previous-next`/`load-more`
    #[error("Invalid pagination style: {0}")]
    InvalidStyle(String),

    /// Missing, non-numeric, zero or negative page size
    #[error("Invalid items per page: {0}")]
    InvalidItemsPerPage(String),

    /// Not a recognizable boolean
    #[error("Invalid flag value: {0}")]
    InvalidFlag(String),
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or parsing the file failed
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// Serializing the configuration to TOML failed
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
