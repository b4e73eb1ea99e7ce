//! Faceted filtering
//!
//! This module decides which items of a container match the user's checkbox
//! selection and announces every change to interested listeners.
//!
//! # Features
//!
//! - **Engine**: pure AND/OR evaluation of a grouped selection over item tags
//! - **Controller**: select-all / partial-selection state machine with the
//!   no-results panel side effect
//! - **Events**: typed `filter-applied` / `filter-cleared` notifications with
//!   explicit listener registration
//!
//! # Examples
//!
//! ```
//! use facetgrid::filters::{FilterConfig, FilterController, FilterEvent, Operator};
//! use facetgrid::item::{Item, RawItem};
//!
//! let items: Vec<Item> = vec![
//!     RawItem::new(0).category("color", "Red").category("size", "S").into(),
//!     RawItem::new(1).category("color", "Blue").category("size", "S").into(),
//! ];
//!
//! let config = FilterConfig::new(Operator::And, Operator::Or);
//! let mut filter = FilterController::new(config, &items, None);
//!
//! let outcome = filter.toggle(&items, "color", "Red", true);
//! assert_eq!(outcome.visible.len(), 1);
//! assert!(matches!(outcome.event, FilterEvent::FilterApplied { visible_count: 1, .. }));
//! ```

pub mod controller;
pub mod engine;
pub mod events;
pub mod types;

pub use controller::{FilterController, FilterOutcome, FilterState, NoResultsPanel};
pub use engine::{ItemFilterExt, evaluate, evaluate_all};
pub use events::{FilterEvent, ListenerId, Listeners};
pub use types::{Category, FilterConfig, Operator, Selection, VisibleSet};
