//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::records: Record table, filtering, sorting, pagination

pub mod error;
pub mod routes;

use axum::{
    http::{Method, Uri},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use editweb_config::Config;
use editweb_core::{RecordStats, RecordStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<RecordStore>>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::records::{
        api_records, htmx_records_direction, htmx_records_filter, htmx_records_next, htmx_records_page,
        htmx_records_prev, htmx_records_reset, htmx_records_sort, htmx_records_table, page_records,
    };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods([Method::GET]);

    let api = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/records", get(api_records))
        .route("/api/stats", get(api_stats))
        .route("/api/reload", post(api_reload))
        .layer(cors);

    Router::new()
        .route("/", get(index_page))
        // Full page
        .route("/records", get(page_records))
        // HTMX partial routes
        .route("/records/table", get(htmx_records_table))
        .route("/records/filter", get(htmx_records_filter))
        .route("/records/sort/:key", get(htmx_records_sort))
        .route("/records/direction", get(htmx_records_direction))
        .route("/records/page/:page", get(htmx_records_page))
        .route("/records/prev", get(htmx_records_prev))
        .route("/records/next", get(htmx_records_next))
        .route("/records/reset", get(htmx_records_reset))
        .merge(api)
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn index_page() -> Redirect {
    Redirect::to("/records")
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        resource: uri.path().to_string(),
    }
}

/// Record statistics (JSON API)
async fn api_stats(state: axum::extract::State<AppState>) -> Json<RecordStats> {
    let store = state.store.read().await;
    Json(store.stats())
}

/// Reload records from the source
///
/// A failed reload keeps serving the records that were already loaded.
async fn api_reload(state: axum::extract::State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let mut store = state.store.write().await;
    let count = store.load().await?;
    Ok(Json(serde_json::json!({ "success": true, "records": count })))
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Editweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css">
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    <main class="max-w-7xl mx-auto p-6">{}</main>
</body>
</html>"#,
        editweb_utils::escape_html(title),
        content
    )
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the listener fails.
pub async fn start_server(config: Config, store: Arc<RwLock<RecordStore>>) -> std::io::Result<()> {
    let addr = config.bind_address();
    let state = AppState { store, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Editweb server on http://{}", addr);
    log::info!("  - /records (Record table)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}
