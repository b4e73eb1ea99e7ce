//! Show/hide transitions
//!
//! Decoupled from filtering and pagination: callers decide *that* an item
//! appears or disappears, this module decides *when* its visual state
//! changes.

pub mod scheduler;
pub mod types;

pub use scheduler::{FiredStep, StepId, StepKind, TransitionScheduler};
pub use types::{ItemVisual, Opacity, REVEAL_TICK, Transform, TransitionFamily};
