//! Pagination of the visible set
//!
//! - **Engine**: pure page assignment over an ordered visible sequence
//! - **Strategies**: indexed pages (one page at a time) and incremental
//!   reveal (pages `1..=n`, grown with "Load More")
//! - **Controller**: reacts to filter notifications, applies visibility and
//!   exposes the control region as a [`ControlsView`]

pub mod controller;
pub mod engine;
pub mod incremental;
pub mod indexed;
pub mod types;
pub mod view;

pub use controller::{DEFAULT_ITEMS_PER_PAGE, PaginationController, PaginationSettings};
pub use engine::{PageAssignment, paginate};
pub use incremental::{IncrementalReveal, LOAD_MORE_LABEL};
pub use indexed::IndexedPages;
pub use types::{PaginationStyle, Strategy};
pub use view::{Controls, ControlsView, PageLink};
