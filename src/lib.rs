//! Facetgrid - faceted filtering and pagination for catalog grids
//!
//! This library narrows a grid of tagged items through checkbox selections
//! combined with AND/OR logic, paginates what remains by numbered pages or
//! incremental "load more" reveal, and schedules the show/hide transitions
//! that follow.

use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod config;
pub mod container;
pub mod filters;
pub mod item;
pub mod output;
pub mod pagination;
pub mod tags;
pub mod transition;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum GridError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
    /// Catalog error
    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalog::CatalogError),
    /// JSON output error
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
