//! Snapshot of the pagination control region

use super::types::{PaginationStyle, Strategy};
use serde::Serialize;

/// One numbered page link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub number: usize,
    pub active: bool,
}

/// Affordances currently rendered in the control region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Controls {
    Numbered {
        pages: Vec<PageLink>,
        prev_enabled: bool,
        next_enabled: bool,
    },
    PreviousNext {
        prev_enabled: bool,
        next_enabled: bool,
        current_page: usize,
        total_pages: usize,
    },
    LoadMore {
        button_visible: bool,
        label: String,
        revealed_page: usize,
        total_pages: usize,
    },
}

impl Controls {
    /// Active page link, for numbered controls
    #[must_use]
    pub fn active_page(&self) -> Option<usize> {
        match self {
            Self::Numbered { pages, .. } => pages.iter().find(|p| p.active).map(|p| p.number),
            Self::PreviousNext { current_page, .. } => Some(*current_page),
            Self::LoadMore { .. } => None,
        }
    }

    /// `Page X of Y` info line, for prev/next controls
    #[must_use]
    pub fn page_info(&self) -> Option<String> {
        match self {
            Self::PreviousNext {
                current_page,
                total_pages,
                ..
            } => Some(format!("Page {current_page} of {total_pages}")),
            _ => None,
        }
    }
}

/// The control region as a whole
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlsView {
    /// Whether the region is displayed at all
    pub visible: bool,
    pub style: PaginationStyle,
    pub strategy: Strategy,
    pub controls: Controls,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_info_only_for_previous_next() {
        let controls = Controls::PreviousNext {
            prev_enabled: true,
            next_enabled: false,
            current_page: 2,
            total_pages: 2,
        };
        assert_eq!(controls.page_info().as_deref(), Some("Page 2 of 2"));
        assert_eq!(controls.active_page(), Some(2));

        let load_more = Controls::LoadMore {
            button_visible: true,
            label: "Load More".to_string(),
            revealed_page: 1,
            total_pages: 2,
        };
        assert_eq!(load_more.page_info(), None);
        assert_eq!(load_more.active_page(), None);
    }

    #[test]
    fn test_controls_serialize_with_kind_tag() {
        let controls = Controls::Numbered {
            pages: vec![PageLink {
                number: 1,
                active: true,
            }],
            prev_enabled: false,
            next_enabled: false,
        };
        let json = serde_json::to_value(&controls).unwrap();
        assert_eq!(json["kind"], "numbered");
        assert_eq!(json["pages"][0]["active"], true);
    }
}
