//! The table view model
//!
//! Owns the record set and the [`ViewState`]. Every mutation runs the
//! same pipeline to completion (filter, then stable sort, then slice),
//! re-synchronizes [`ViewModel::location`] and notifies observers.

use editweb_config::{DEFAULT_MAX_PAGE_BUTTONS, DEFAULT_PAGE_SIZE};
use editweb_source::Record;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::collate;
use crate::pagination::{self, PaginationModel};
use crate::view::{Filters, SortDirection, SortKey, ViewState};

/// Receives the new state after every mutation
///
/// The presentation layer hooks in here; the view model knows nothing
/// about how it is drawn.
pub trait ViewObserver: Send + Sync {
    fn view_changed(&self, state: &ViewState, location: &str);
}

/// Serializable picture of one rendered view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub state: ViewState,
    pub location: String,
    pub pagination: PaginationModel,
    pub records: Vec<Record>,
}

pub struct ViewModel {
    records: Arc<Vec<Record>>,
    state: ViewState,
    page_size: usize,
    max_page_buttons: usize,
    /// Indices into `records`, filtered and sorted
    derived: Vec<usize>,
    location: String,
    observers: Vec<Arc<dyn ViewObserver>>,
}

impl ViewModel {
    /// Create a view over `records`, seeded with `state`
    pub fn new(records: Arc<Vec<Record>>, state: ViewState) -> Self {
        Self::with_pagination(records, state, DEFAULT_PAGE_SIZE, DEFAULT_MAX_PAGE_BUTTONS)
    }

    pub fn with_pagination(
        records: Arc<Vec<Record>>,
        state: ViewState,
        page_size: usize,
        max_page_buttons: usize,
    ) -> Self {
        let mut model = Self {
            records,
            state,
            page_size: page_size.max(1),
            max_page_buttons: max_page_buttons.max(1),
            derived: Vec::new(),
            location: String::new(),
            observers: Vec::new(),
        };
        model.recompute();
        model
    }

    pub fn subscribe(&mut self, observer: Arc<dyn ViewObserver>) {
        self.observers.push(observer);
    }

    // ==================== Mutations ====================

    /// Replace all three filters and go back to the first page
    pub fn set_filters(&mut self, name: &str, date: &str, title: &str) {
        self.state.filters = Filters::new(name, date, title);
        self.state.current_page = 1;
        self.refresh();
    }

    /// Set the direction from the selector value (`"asc"` or `"desc"`)
    pub fn set_sort_direction(&mut self, value: &str) {
        self.state.sort_direction = SortDirection::from_select_value(value);
        self.refresh();
    }

    /// Sort by `key`; sorting by the active key again flips the direction
    pub fn sort_by(&mut self, key: SortKey) {
        if self.state.sort_key == key {
            self.state.sort_direction = self.state.sort_direction.toggled();
        } else {
            self.state.sort_key = key;
            self.state.sort_direction = SortDirection::Ascending;
        }
        self.refresh();
    }

    /// Jump to `page`. Pages past the end are allowed and show no rows.
    pub fn go_to_page(&mut self, page: usize) {
        self.state.current_page = page.max(1);
        self.refresh();
    }

    /// Clear filters and return to the default sort on page 1
    pub fn reset_view(&mut self) {
        self.state = ViewState::default();
        self.refresh();
    }

    /// Step back one page; does nothing on page 1
    pub fn previous_page(&mut self) {
        if self.state.current_page > 1 {
            self.state.current_page -= 1;
            self.refresh();
        }
    }

    /// Step forward one page; does nothing on the last page
    pub fn next_page(&mut self) {
        if self.state.current_page < self.total_pages() {
            self.state.current_page += 1;
            self.refresh();
        }
    }

    // ==================== Reads ====================

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Query string for the current state, as last synchronized
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rows on the current page, at most `page_size`
    pub fn visible_page(&self) -> Vec<&Record> {
        let start = self.state.current_page.saturating_sub(1).saturating_mul(self.page_size);
        self.derived
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|&i| &self.records[i])
            .collect()
    }

    pub fn pagination_model(&self) -> PaginationModel {
        pagination::build(
            self.state.current_page,
            self.derived.len(),
            self.page_size,
            self.max_page_buttons,
        )
    }

    /// Every record passing the filters, in display order
    pub fn filtered_sorted(&self) -> impl Iterator<Item = &Record> + '_ {
        self.derived.iter().map(|&i| &self.records[i])
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            state: self.state.clone(),
            location: self.location.clone(),
            pagination: self.pagination_model(),
            records: self.visible_page().into_iter().cloned().collect(),
        }
    }

    pub fn filtered_count(&self) -> usize {
        self.derived.len()
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.derived.len(), self.page_size)
    }

    // ==================== Pipeline ====================

    fn refresh(&mut self) {
        self.recompute();
        for observer in &self.observers {
            observer.view_changed(&self.state, &self.location);
        }
    }

    fn recompute(&mut self) {
        let filters = &self.state.filters;
        let records = &self.records;
        let mut derived: Vec<usize> = (0..records.len())
            .filter(|&i| filters.matches(&records[i]))
            .collect();

        let key = self.state.sort_key;
        let direction = self.state.sort_direction;
        derived.sort_by(|&a, &b| {
            direction.apply(collate::compare_ignore_case(key.value(&records[a]), key.value(&records[b])))
        });

        self.derived = derived;
        self.location = self.state.to_query_string();

        log::debug!(
            "View recomputed: {} of {} records match, page {}/{}",
            self.derived.len(),
            self.records.len(),
            self.state.current_page,
            self.total_pages()
        );
    }
}
