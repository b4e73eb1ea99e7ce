//! Testing utilities for facetgrid
//!
//! Fixture catalogs shared by unit tests across modules.
//!
//! Only available when compiled with `cfg(test)`.

use crate::item::{Item, RawItem};

/// Ten raw items tagged by `color` and `size`
///
/// - items 0, 1, 4, 5, 8, 9 are `red`; items 2, 3, 6, 7 are `blue`
/// - even items are `S`; odd items are `M`
#[must_use]
pub fn color_size_raw() -> Vec<RawItem> {
    (0..10)
        .map(|i| {
            let color = if i % 4 < 2 { "red" } else { "blue" };
            let size = if i % 2 == 0 { "S" } else { "M" };
            RawItem::new(i)
                .label(format!("Product {i}"))
                .category("color", color)
                .category("size", size)
        })
        .collect()
}

/// [`color_size_raw`], normalized
#[must_use]
pub fn color_size_catalog() -> Vec<Item> {
    color_size_raw().iter().map(Item::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        let items = color_size_catalog();
        assert_eq!(items.len(), 10);

        let red: Vec<usize> = items
            .iter()
            .filter(|i| i.tags.has(&"color".into(), &"red".into()))
            .map(|i| i.index.0)
            .collect();
        assert_eq!(red, vec![0, 1, 4, 5, 8, 9]);
        assert!(items[3].tags.has(&"size".into(), &"M".into()));
    }
}
