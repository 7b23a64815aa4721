//! Error types for editweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use editweb_core::{CoreError, ErrorCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Core(e) => match e.code() {
                ErrorCode::InvalidSortKey => StatusCode::BAD_REQUEST,
                ErrorCode::SourceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Core(e) => serde_json::to_value(e.to_details()).unwrap_or_default(),
            other => serde_json::json!({ "message": other.to_string() }),
        };
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::debug!("Request rejected: {}", self);
        }
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let missing = ApiError::from(CoreError::SourceUnavailable { location: "records.json".to_string() });
        assert_eq!(missing.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bad_sort = ApiError::from(CoreError::InvalidSortKey { key: "amount".to_string() });
        assert_eq!(bad_sort.status(), StatusCode::BAD_REQUEST);

        assert_eq!(ApiError::from(CoreError::IoError).status(), StatusCode::INTERNAL_SERVER_ERROR);
        let not_found = ApiError::NotFound { resource: "/x".to_string() };
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
    }
}
