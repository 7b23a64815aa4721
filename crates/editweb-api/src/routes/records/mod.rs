//! Record routes - Record table, filtering, sorting, pagination
//!
//! The view state travels in the query string of every request. Each HTMX
//! endpoint applies one view operation and answers with the re-rendered
//! table plus an `HX-Replace-Url` header, so the address bar always holds a
//! shareable link to what is on screen.
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page and table rendering

pub mod api;
pub mod page;

pub use api::{
    api_records,
    htmx_records_direction,
    htmx_records_filter,
    htmx_records_next,
    htmx_records_page,
    htmx_records_prev,
    htmx_records_reset,
    htmx_records_sort,
    htmx_records_table,
};

pub use page::page_records;
