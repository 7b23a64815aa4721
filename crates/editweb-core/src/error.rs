//! Error types for editweb-core
//!
//! Error codes, severities and suggestion-carrying details for everything
//! that can go wrong while loading records or interpreting view requests.

use editweb_source::SourceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record source missing
    SourceUnavailable,
    /// Record data could not be parsed
    InvalidFormat,
    /// IO error
    IoError,
    /// Unknown sort column
    InvalidSortKey,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::SourceUnavailable => write!(f, "SOURCE_UNAVAILABLE"),
            ErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::InvalidSortKey => write!(f, "INVALID_SORT_KEY"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for editweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Record source unavailable: {location}")]
    SourceUnavailable { location: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("IO error occurred")]
    IoError,

    #[error("Unknown sort column: {key}")]
    InvalidSortKey { key: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::SourceUnavailable { .. } => ErrorCode::SourceUnavailable,
            CoreError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            CoreError::IoError => ErrorCode::IoError,
            CoreError::InvalidSortKey { .. } => ErrorCode::InvalidSortKey,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::SourceUnavailable { .. } => ErrorSeverity::Error,
            CoreError::InvalidFormat { .. } => ErrorSeverity::Error,
            CoreError::IoError => ErrorSeverity::Error,
            CoreError::InvalidSortKey { .. } => ErrorSeverity::Info,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::SourceUnavailable { location } => {
                details = details
                    .with_suggestion(format!("Check that '{}' exists and is readable.", location))
                    .with_suggestion("Set data.path and data.records_file in the config file.".to_string());
            }
            CoreError::InvalidFormat { .. } => {
                details = details.with_suggestion(
                    "Records must be a JSON array of objects with date, name, title, field, old_value and new_value strings."
                        .to_string(),
                );
            }
            CoreError::InvalidSortKey { .. } => {
                details = details.with_suggestion("Sort by one of: name, date, title.".to_string());
            }
            _ => {}
        }

        details
    }
}

impl From<SourceError> for CoreError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound { location } => CoreError::SourceUnavailable { location },
            SourceError::Malformed { .. } => CoreError::InvalidFormat { message: err.to_string() },
            SourceError::IoError(_) => CoreError::IoError,
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::SourceUnavailable.to_string(), "SOURCE_UNAVAILABLE");
        assert_eq!(ErrorCode::InvalidSortKey.to_string(), "INVALID_SORT_KEY");
    }

    #[test]
    fn test_core_error_severity() {
        assert_eq!(
            CoreError::SourceUnavailable { location: "records.json".to_string() }.severity(),
            ErrorSeverity::Error
        );
        assert_eq!(CoreError::IoError.severity(), ErrorSeverity::Error);
        let error = CoreError::InvalidSortKey { key: "amount".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_from_source_error() {
        let err: CoreError = SourceError::NotFound { location: "records.json".to_string() }.into();
        assert_eq!(err.code(), ErrorCode::SourceUnavailable);

        let err: CoreError = SourceError::Malformed {
            location: "records.json".to_string(),
            message: "expected value".to_string(),
        }
        .into();
        assert_eq!(err.code(), ErrorCode::InvalidFormat);
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_error_details_suggestions() {
        let details = CoreError::SourceUnavailable { location: "data/records.json".to_string() }.to_details();
        assert_eq!(details.code, ErrorCode::SourceUnavailable);
        assert!(details.suggestions[0].contains("data/records.json"));
        assert!(details.to_string().starts_with("[SOURCE_UNAVAILABLE]"));
    }
}
