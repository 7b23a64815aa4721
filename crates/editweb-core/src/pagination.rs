//! Page selector layout
//!
//! A window of numbered buttons around the current page, with the first
//! and last page pinned at the edges and ellipses marking the gaps.

use serde::{Deserialize, Serialize};

/// One entry of the page selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageButton {
    pub label: String,
    /// Target page; `None` for an ellipsis
    pub page: Option<usize>,
    pub is_ellipsis: bool,
    pub is_current: bool,
}

impl PageButton {
    fn page(page: usize, current_page: usize) -> Self {
        Self {
            label: page.to_string(),
            page: Some(page),
            is_ellipsis: false,
            is_current: page == current_page,
        }
    }

    fn ellipsis() -> Self {
        Self {
            label: "...".to_string(),
            page: None,
            is_ellipsis: true,
            is_current: false,
        }
    }
}

/// Everything a renderer needs to draw the page selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationModel {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_records: usize,
    pub buttons: Vec<PageButton>,
    /// Previous moves one page back
    pub has_previous: bool,
    /// Next moves one page forward
    pub has_next: bool,
}

/// Number of pages needed for `total_records`
pub fn total_pages(total_records: usize, page_size: usize) -> usize {
    total_records.div_ceil(page_size.max(1))
}

/// Lay out the page selector
///
/// The window starts `max_buttons / 2` pages before the current page
/// (never before page 1) and spans at most `max_buttons` pages. A current
/// page past the end still gets the leading `1 ...` but no numbered window.
pub fn build(current_page: usize, total_records: usize, page_size: usize, max_buttons: usize) -> PaginationModel {
    let total = total_pages(total_records, page_size);
    let mut buttons = Vec::new();

    if total > 0 {
        let max_buttons = max_buttons.max(1);
        let start = current_page.saturating_sub(max_buttons / 2).max(1);
        let end = total.min(start.saturating_add(max_buttons - 1));

        if start > 1 {
            buttons.push(PageButton::page(1, current_page));
            if start > 2 {
                buttons.push(PageButton::ellipsis());
            }
        }

        for page in start..=end {
            buttons.push(PageButton::page(page, current_page));
        }

        if end < total {
            if end < total - 1 {
                buttons.push(PageButton::ellipsis());
            }
            buttons.push(PageButton::page(total, current_page));
        }
    }

    PaginationModel {
        current_page,
        total_pages: total,
        total_records,
        buttons,
        has_previous: current_page > 1,
        has_next: current_page < total,
    }
}
