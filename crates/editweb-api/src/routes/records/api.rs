//! Record API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_records: Current view as JSON
//! - htmx_records_table: Render the view described by the query string
//! - htmx_records_filter: Apply name/date/title filters
//! - htmx_records_sort: Sort by a column, toggling on repeat
//! - htmx_records_direction: Set the sort direction
//! - htmx_records_page: Jump to a page
//! - htmx_records_prev / htmx_records_next: Step one page
//! - htmx_records_reset: Clear filters and sorting

use crate::{ApiError, AppState};
use axum::extract::{Path, Query};
use axum::http::{HeaderName, HeaderValue};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use editweb_core::{RecordStore, SortKey, ViewModel, ViewObserver, ViewSnapshot, ViewState};
use std::sync::{Arc, Mutex};

type Params = Query<Vec<(String, String)>>;

static HX_REPLACE_URL: HeaderName = HeaderName::from_static("hx-replace-url");

/// Remembers the last location a view asked the address bar to show
#[derive(Default)]
struct UrlSync {
    replaced: Mutex<Option<String>>,
}

impl UrlSync {
    fn take(&self) -> Option<String> {
        self.replaced.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl ViewObserver for UrlSync {
    fn view_changed(&self, _state: &ViewState, location: &str) {
        if let Ok(mut slot) = self.replaced.lock() {
            *slot = Some(format!("/records{}", location));
        }
    }
}

fn open_view(store: &RecordStore, params: &[(String, String)]) -> ViewModel {
    store.view(ViewState::from_query_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str()))))
}

fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Render the table partial, optionally replacing the browser location
fn partial(view: &ViewModel, replace_url: Option<String>) -> Result<Response, ApiError> {
    let mut response = Html(super::page::render_table(view)).into_response();
    if let Some(url) = replace_url {
        let value = HeaderValue::from_str(&url).map_err(|_| ApiError::InternalError)?;
        response.headers_mut().insert(HX_REPLACE_URL.clone(), value);
    }
    Ok(response)
}

/// Run one view operation and answer with the re-rendered table
///
/// The location is only replaced when the operation actually changed the view.
async fn apply<F>(state: &AppState, params: &[(String, String)], operation: F) -> Result<Response, ApiError>
where
    F: FnOnce(&mut ViewModel),
{
    let mut view = {
        let store = state.store.read().await;
        open_view(&store, params)
    };

    let sync = Arc::new(UrlSync::default());
    view.subscribe(sync.clone());
    operation(&mut view);

    partial(&view, sync.take())
}

/// Current view (JSON API)
pub async fn api_records(state: axum::extract::State<AppState>, params: Params) -> Json<ViewSnapshot> {
    let store = state.store.read().await;
    Json(open_view(&store, &params.0).snapshot())
}

/// HTMX: Table for the view in the query string
pub async fn htmx_records_table(state: axum::extract::State<AppState>, params: Params) -> Result<Response, ApiError> {
    let view = {
        let store = state.store.read().await;
        open_view(&store, &params.0)
    };
    let location = format!("/records{}", view.location());
    partial(&view, Some(location))
}

/// HTMX: Apply the filter form
pub async fn htmx_records_filter(state: axum::extract::State<AppState>, params: Params) -> Result<Response, ApiError> {
    let name = param(&params.0, "name").unwrap_or("").to_string();
    let date = param(&params.0, "date").unwrap_or("").to_string();
    let title = param(&params.0, "title").unwrap_or("").to_string();
    apply(&state, &params.0, move |view| view.set_filters(&name, &date, &title)).await
}

/// HTMX: Sort by a column
pub async fn htmx_records_sort(
    state: axum::extract::State<AppState>,
    Path(key): Path<String>,
    params: Params,
) -> Result<Response, ApiError> {
    let key: SortKey = key.parse()?;
    apply(&state, &params.0, move |view| view.sort_by(key)).await
}

/// HTMX: Direction selector changed
pub async fn htmx_records_direction(state: axum::extract::State<AppState>, params: Params) -> Result<Response, ApiError> {
    let value = param(&params.0, "value").unwrap_or("").to_string();
    apply(&state, &params.0, move |view| view.set_sort_direction(&value)).await
}

/// HTMX: Jump to a page
pub async fn htmx_records_page(
    state: axum::extract::State<AppState>,
    Path(page): Path<usize>,
    params: Params,
) -> Result<Response, ApiError> {
    apply(&state, &params.0, move |view| view.go_to_page(page)).await
}

/// HTMX: Previous page
pub async fn htmx_records_prev(state: axum::extract::State<AppState>, params: Params) -> Result<Response, ApiError> {
    apply(&state, &params.0, |view| view.previous_page()).await
}

/// HTMX: Next page
pub async fn htmx_records_next(state: axum::extract::State<AppState>, params: Params) -> Result<Response, ApiError> {
    apply(&state, &params.0, |view| view.next_page()).await
}

/// HTMX: Show all records with the default sort
pub async fn htmx_records_reset(state: axum::extract::State<AppState>, params: Params) -> Result<Response, ApiError> {
    apply(&state, &params.0, |view| view.reset_view()).await
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use editweb_core::Record;

    fn replaced(response: &axum::response::Response) -> Option<String> {
        response
            .headers()
            .get("hx-replace-url")
            .map(|v| v.to_str().unwrap().to_string())
    }

    fn row_count(html: &str) -> usize {
        html.matches("<tr class='record-row").count()
    }

    #[tokio::test]
    async fn test_table_default_view() {
        let response = get(state_with(records(25)).await, "/records/table").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            replaced(&response).as_deref(),
            Some("/records?name=&date=&title=&sort=date&dir=1&page=1")
        );

        let html = body_text(response).await;
        assert_eq!(row_count(&html), 20);
        assert!(html.contains("2024-01-01"));
        assert!(html.contains("2024-01-20"));
        assert!(!html.contains("2024-01-21"));
    }

    #[tokio::test]
    async fn test_filter_resets_page() {
        let response = get(
            state_with(records(25)).await,
            "/records/filter?sort=date&dir=1&page=2&name=user1&date=&title=",
        )
        .await;
        assert_eq!(
            replaced(&response).as_deref(),
            Some("/records?name=user1&date=&title=&sort=date&dir=1&page=1")
        );
        // user1, user10..user19
        assert_eq!(row_count(&body_text(response).await), 11);
    }

    #[tokio::test]
    async fn test_filter_text_is_encoded_in_location() {
        let records = vec![Record::new("2024-01-01", "A&B #1", "t", "f", "o", "n")];
        let response = get(state_with(records).await, "/records/filter?name=A%26B%20%231").await;
        assert_eq!(
            replaced(&response).as_deref(),
            Some("/records?name=A%26B%20%231&date=&title=&sort=date&dir=1&page=1")
        );
        assert_eq!(row_count(&body_text(response).await), 1);
    }

    #[tokio::test]
    async fn test_sort_toggles_and_switches() {
        let state = state_with(records(25)).await;

        let response = get(state.clone(), "/records/sort/date?sort=date&dir=1&page=2").await;
        assert_eq!(
            replaced(&response).as_deref(),
            Some("/records?name=&date=&title=&sort=date&dir=-1&page=2")
        );

        let response = get(state, "/records/sort/title?sort=date&dir=-1").await;
        assert_eq!(
            replaced(&response).as_deref(),
            Some("/records?name=&date=&title=&sort=title&dir=1&page=1")
        );
    }

    #[tokio::test]
    async fn test_sort_unknown_column() {
        let response = get(state_with(records(3)).await, "/records/sort/amount").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("INVALID_SORT_KEY"));
    }

    #[tokio::test]
    async fn test_direction() {
        let response = get(state_with(records(25)).await, "/records/direction?sort=name&dir=1&page=2&value=desc").await;
        assert_eq!(
            replaced(&response).as_deref(),
            Some("/records?name=&date=&title=&sort=name&dir=-1&page=2")
        );
    }

    #[tokio::test]
    async fn test_go_to_page() {
        let state = state_with(records(25)).await;

        let response = get(state.clone(), "/records/page/2").await;
        let html = body_text(response).await;
        assert_eq!(row_count(&html), 5);
        assert!(html.contains("2024-01-25"));

        let response = get(state, "/records/page/9").await;
        assert_eq!(
            replaced(&response).as_deref(),
            Some("/records?name=&date=&title=&sort=date&dir=1&page=9")
        );
        let html = body_text(response).await;
        assert_eq!(row_count(&html), 0);
        assert!(html.contains("No records"));
    }

    #[tokio::test]
    async fn test_largest_page_number() {
        let response = get(state_with(records(25)).await, "/records/page/18446744073709551615").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            replaced(&response).as_deref(),
            Some("/records?name=&date=&title=&sort=date&dir=1&page=18446744073709551615")
        );
        let html = body_text(response).await;
        assert!(html.contains("No records"));
        assert!(html.contains("Page 18446744073709551615 / 2"));
    }

    #[tokio::test]
    async fn test_prev_and_next_are_guarded() {
        let state = state_with(records(25)).await;

        let response = get(state.clone(), "/records/prev?page=1").await;
        assert_eq!(replaced(&response), None);
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(state.clone(), "/records/next?page=1").await;
        assert_eq!(
            replaced(&response).as_deref(),
            Some("/records?name=&date=&title=&sort=date&dir=1&page=2")
        );

        let response = get(state.clone(), "/records/next?page=2").await;
        assert_eq!(replaced(&response), None);

        let response = get(state, "/records/prev?page=2").await;
        assert_eq!(
            replaced(&response).as_deref(),
            Some("/records?name=&date=&title=&sort=date&dir=1&page=1")
        );
    }

    #[tokio::test]
    async fn test_reset() {
        let response = get(state_with(records(25)).await, "/records/reset?name=zzz&sort=title&dir=-1&page=3").await;
        assert_eq!(
            replaced(&response).as_deref(),
            Some("/records?name=&date=&title=&sort=date&dir=1&page=1")
        );
        assert_eq!(row_count(&body_text(response).await), 20);
    }

    #[tokio::test]
    async fn test_api_records_json() {
        let response = get(state_with(records(25)).await, "/api/records?page=2&sort=name").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["location"], "?name=&date=&title=&sort=name&dir=1&page=2");
        assert_eq!(body["pagination"]["total_pages"], 2);
        assert_eq!(body["records"].as_array().unwrap().len(), 5);
        assert_eq!(body["state"]["sort_key"], "name");
    }

    #[tokio::test]
    async fn test_api_records_empty_store() {
        let body = body_text(get(state_with(vec![]).await, "/api/records").await).await;
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["pagination"]["total_pages"], 0);
        assert!(body["pagination"]["buttons"].as_array().unwrap().is_empty());
        assert!(body["records"].as_array().unwrap().is_empty());
    }
}
