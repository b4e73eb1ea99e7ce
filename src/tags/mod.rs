//! Tag index
//!
//! Turns the raw tag strings of each item into normalized, key-safe tag sets
//! grouped by category, and aggregates them into the container-wide listing.
//! Construction is a one-time transform; nothing here is mutated afterwards.

pub mod index;
pub mod parse;
pub mod types;

pub use index::{CategoryListing, TagCount, TagIndex};
pub use parse::{normalize_label, parse_key_list, parse_labels, strip_markup};
pub use types::{CategoryKey, GENERAL_CATEGORY, ItemTags, Tag, TagKey, TagSet};
