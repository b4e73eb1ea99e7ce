//! Output formatting for CLI display

use crate::filters::NoResultsPanel;
use crate::item::Item;
use crate::pagination::{Controls, ControlsView};
use crate::tags::{CategoryListing, TagCount};
use colored::Colorize;

/// Format an item with its flat tag keys
#[must_use]
pub fn item_line(item: &Item, shown: bool, quiet: bool) -> String {
    if quiet {
        return item.index.to_string();
    }

    let label = item.label.as_deref().unwrap_or("(untitled)");
    let keys = item.tags.flat_keys();
    let tags = if keys.is_empty() {
        "(no tags)".dimmed().to_string()
    } else {
        format!("[{}]", keys.join(", "))
    };

    if shown {
        format!("  {:>3}  {} {tags}", item.index.to_string().cyan(), label.bold())
    } else {
        format!("  {:>3}  {} {tags}", item.index, label).dimmed().to_string()
    }
}

/// Format the pagination control region
#[must_use]
pub fn controls_line(view: &ControlsView) -> Option<String> {
    if !view.visible {
        return None;
    }

    let controls = &view.controls;
    let line = match controls {
        Controls::Numbered {
            pages,
            prev_enabled,
            next_enabled,
        } => {
            let active = controls.active_page();
            let links: Vec<String> = pages
                .iter()
                .map(|link| {
                    if Some(link.number) == active {
                        format!("[{}]", link.number).green().bold().to_string()
                    } else {
                        link.number.to_string()
                    }
                })
                .collect();
            format!(
                "{} {} {}",
                affordance("« Prev", *prev_enabled),
                links.join(" "),
                affordance("Next »", *next_enabled)
            )
        }
        Controls::PreviousNext {
            prev_enabled,
            next_enabled,
            ..
        } => format!(
            "{} {} {}",
            affordance("« Prev", *prev_enabled),
            controls.page_info().unwrap_or_default(),
            affordance("Next »", *next_enabled)
        ),
        Controls::LoadMore {
            button_visible,
            label,
            revealed_page,
            total_pages,
        } => {
            if *button_visible {
                format!("[{}] ({revealed_page}/{total_pages})", label.green())
            } else {
                format!("({revealed_page}/{total_pages})")
            }
        }
    };

    Some(line)
}

fn affordance(label: &str, enabled: bool) -> String {
    if enabled {
        label.to_string()
    } else {
        label.dimmed().to_string()
    }
}

/// Format the no-results panel, if shown
#[must_use]
pub fn no_results_line(panel: Option<&NoResultsPanel>) -> Option<String> {
    panel
        .filter(|panel| panel.shown)
        .map(|panel| panel.message.yellow().to_string())
}

/// Format a category heading
#[must_use]
pub fn category_heading(listing: &CategoryListing) -> String {
    if listing.title == listing.key.as_str() {
        format!("{}:", listing.title.bold())
    } else {
        format!("{} ({}):", listing.title.bold(), listing.key)
    }
}

/// Format a tag with usage count
#[must_use]
pub fn tag_with_count(count: &TagCount, quiet: bool) -> String {
    if quiet {
        count.tag.key.to_string()
    } else if count.tag.label == count.tag.key.as_str() {
        format!("  {} (used by {} item(s))", count.tag.label, count.items)
    } else {
        format!(
            "  {} [{}] (used by {} item(s))",
            count.tag.label, count.tag.key, count.items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::RawItem;
    use crate::pagination::{PageLink, PaginationStyle, Strategy};
    use crate::tags::{Tag, TagKey};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_item_line_quiet() {
        let item = Item::from(RawItem::new(4).label("Scarf"));
        assert_eq!(item_line(&item, true, true), "4");
    }

    #[test]
    fn test_item_line_lists_flat_keys() {
        plain();
        let item = Item::from(RawItem::new(2).label("Coat").tags("Sale").category("color", "Red"));
        let line = item_line(&item, true, false);
        assert!(line.contains("Coat"));
        assert!(line.contains("[Sale, color-Red]"));
    }

    #[test]
    fn test_hidden_controls_print_nothing() {
        let view = ControlsView {
            visible: false,
            style: PaginationStyle::Default,
            strategy: Strategy::Indexed,
            controls: Controls::Numbered {
                pages: vec![PageLink {
                    number: 1,
                    active: true,
                }],
                prev_enabled: false,
                next_enabled: false,
            },
        };
        assert!(controls_line(&view).is_none());
    }

    #[test]
    fn test_numbered_line_marks_active_page() {
        plain();
        let view = ControlsView {
            visible: true,
            style: PaginationStyle::Default,
            strategy: Strategy::Indexed,
            controls: Controls::Numbered {
                pages: vec![
                    PageLink {
                        number: 1,
                        active: false,
                    },
                    PageLink {
                        number: 2,
                        active: true,
                    },
                ],
                prev_enabled: true,
                next_enabled: false,
            },
        };
        assert_eq!(controls_line(&view).as_deref(), Some("« Prev 1 [2] Next »"));
    }

    #[test]
    fn test_previous_next_line() {
        plain();
        let view = ControlsView {
            visible: true,
            style: PaginationStyle::PreviousNext,
            strategy: Strategy::Indexed,
            controls: Controls::PreviousNext {
                prev_enabled: true,
                next_enabled: false,
                current_page: 2,
                total_pages: 2,
            },
        };
        assert_eq!(
            controls_line(&view).as_deref(),
            Some("« Prev Page 2 of 2 Next »")
        );
    }

    #[test]
    fn test_tag_with_count() {
        let count = TagCount {
            tag: Tag {
                key: TagKey::new("Dark-Blue"),
                label: "Dark Blue".to_string(),
            },
            items: 3,
        };
        assert_eq!(tag_with_count(&count, true), "Dark-Blue");
        plain();
        assert_eq!(
            tag_with_count(&count, false),
            "  Dark Blue [Dark-Blue] (used by 3 item(s))"
        );
    }

    #[test]
    fn test_no_results_line() {
        let mut panel = NoResultsPanel::new("No products found");
        assert!(no_results_line(Some(&panel)).is_none());
        panel.shown = true;
        plain();
        assert_eq!(
            no_results_line(Some(&panel)).as_deref(),
            Some("No products found")
        );
        assert!(no_results_line(None).is_none());
    }
}
