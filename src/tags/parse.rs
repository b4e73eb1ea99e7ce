//! Raw tag string normalization
//!
//! Tag data arrives in two shapes:
//!
//! - **Label lists**: comma-separated display labels as entered for an item
//!   (`"Dark Blue, Red"`). Each label is stripped of markup and trimmed, and
//!   its internal whitespace is collapsed to `-` to form the key (`Dark-Blue`).
//! - **Key lists**: the serialized whole-item key attribute, where keys are
//!   separated by runs of whitespace and/or commas (`"Sale color-Red,size-S"`).
//!
//! Empty or whitespace-only tokens are dropped in both shapes. This is never
//! an error.

use super::types::{Tag, TagKey, TagSet};
use regex::Regex;
use std::sync::LazyLock;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"));
static KEY_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("separator pattern is valid"));

/// Remove `<...>` markup from a label
#[must_use]
pub fn strip_markup(raw: &str) -> String {
    MARKUP.replace_all(raw, "").into_owned()
}

/// Normalize a single label into a tag
///
/// Returns `None` for labels that are empty once markup and surrounding
/// whitespace are removed.
#[must_use]
pub fn normalize_label(raw: &str) -> Option<Tag> {
    let stripped = strip_markup(raw);
    let label = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if label.is_empty() {
        return None;
    }

    let key = label.split(' ').collect::<Vec<_>>().join("-");
    Some(Tag {
        key: TagKey::new(key),
        label,
    })
}

/// Parse a comma-separated label list into an ordered tag set
#[must_use]
pub fn parse_labels(raw: &str) -> TagSet {
    raw.split(',').filter_map(normalize_label).collect()
}

/// Parse a serialized key list (whitespace and/or comma separated)
///
/// Keys are taken as-is; each tag's label is its key.
#[must_use]
pub fn parse_key_list(raw: &str) -> TagSet {
    KEY_SEPARATORS
        .split(raw)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| Tag {
            key: TagKey::new(token),
            label: token.to_string(),
        })
        .collect()
}
