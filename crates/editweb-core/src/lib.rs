//! Core record handling and the table view model

pub mod collate;
pub mod error;
pub mod model;
pub mod pagination;
pub mod query;
pub mod view;

use chrono::NaiveDate;
use editweb_config::Config;
use editweb_source::SourceRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

pub use editweb_source::Record;
pub use error::{CoreError, ErrorCode, ErrorDetails, ErrorSeverity};
pub use model::{ViewModel, ViewObserver, ViewSnapshot};
pub use pagination::{PageButton, PaginationModel};
pub use view::{Filters, SortDirection, SortKey, ViewState};

/// Load status of the record store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// Nothing attempted yet
    Empty,
    /// Last load succeeded
    Ready,
    /// Last load failed
    Failed,
}

/// Summary numbers for the page header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStats {
    pub total_records: usize,
    pub distinct_dates: usize,
    pub distinct_names: usize,
    pub date_range_start: Option<String>,
    pub date_range_end: Option<String>,
}

/// The loaded record set
///
/// Records are replaced wholesale on load and never mutated in place;
/// views hold their own `Arc` so a reload never disturbs a view in use.
pub struct RecordStore {
    source: SourceRef,
    records: Arc<Vec<Record>>,
    status: LoadStatus,
    page_size: usize,
    max_page_buttons: usize,
}

impl RecordStore {
    pub fn new(config: &Config, source: SourceRef) -> Self {
        Self {
            source,
            records: Arc::new(Vec::new()),
            status: LoadStatus::Empty,
            page_size: config.pagination.page_size,
            max_page_buttons: config.pagination.max_page_buttons,
        }
    }

    /// Fetch every record from the source
    ///
    /// On failure the previously loaded records stay in place.
    pub async fn load(&mut self) -> Result<usize, CoreError> {
        match self.source.load().await {
            Ok(records) => {
                let count = records.len();
                self.records = Arc::new(records);
                self.status = LoadStatus::Ready;
                log::info!("Loaded {} records from {}", count, self.source.describe());
                Ok(count)
            }
            Err(e) => {
                self.status = LoadStatus::Failed;
                log::error!("Error fetching records from {}: {}", self.source.describe(), e);
                Err(e.into())
            }
        }
    }

    pub fn records(&self) -> Arc<Vec<Record>> {
        Arc::clone(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Open a view over the current records
    pub fn view(&self, state: ViewState) -> ViewModel {
        ViewModel::with_pagination(self.records(), state, self.page_size, self.max_page_buttons)
    }

    /// Record statistics; unparseable dates are left out of the date range
    pub fn stats(&self) -> RecordStats {
        let dates: BTreeSet<&str> = self.records.iter().map(|r| r.date.as_str()).collect();
        let names: BTreeSet<&str> = self.records.iter().map(|r| r.name.as_str()).collect();

        let date_range = dates
            .iter()
            .filter_map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .fold((None, None), |(min, max): (Option<NaiveDate>, Option<NaiveDate>), date| {
                (Some(min.unwrap_or(date).min(date)), Some(max.unwrap_or(date).max(date)))
            });

        RecordStats {
            total_records: self.records.len(),
            distinct_dates: dates.len(),
            distinct_names: names.len(),
            date_range_start: date_range.0.map(|d| d.to_string()),
            date_range_end: date_range.1.map(|d| d.to_string()),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use editweb_source::{JsonFileSource, StaticSource};

    fn sample() -> Vec<Record> {
        vec![
            Record::new("2024-03-01", "Alice", "Invoice", "amount", "10", "12"),
            Record::new("2024-01-15", "Bob", "Refund", "status", "open", "closed"),
            Record::new("2024-03-01", "Alice", "Invoice", "due", "2024-04-01", "2024-05-01"),
            Record::new("someday", "Carol", "Draft", "memo", "", "x"),
        ]
    }

    fn store(records: Vec<Record>) -> RecordStore {
        RecordStore::new(&Config::default(), Arc::new(StaticSource::new(records)))
    }

    #[tokio::test]
    async fn test_load_from_static_source() {
        let mut store = store(sample());
        assert_eq!(store.status(), LoadStatus::Empty);
        assert!(store.is_empty());

        let count = store.load().await.unwrap();
        assert_eq!(count, 4);
        assert_eq!(store.status(), LoadStatus::Ready);
        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn test_load_failure_leaves_store_empty() {
        let source = Arc::new(JsonFileSource::new("/nonexistent/records.json"));
        let mut store = RecordStore::new(&Config::default(), source);

        let err = store.load().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::SourceUnavailable);
        assert_eq!(store.status(), LoadStatus::Failed);

        let view = store.view(ViewState::default());
        assert!(view.visible_page().is_empty());
        assert_eq!(view.pagination_model().total_pages, 0);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_records() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"[{"date":"2024-01-01","name":"Alice","title":"Invoice","field":"amount","old_value":"1","new_value":"2"}]"#,
        )
        .unwrap();

        let mut store = RecordStore::new(&Config::default(), Arc::new(JsonFileSource::new(file.path())));
        assert_eq!(store.load().await.unwrap(), 1);

        std::fs::write(file.path(), "not json").unwrap();
        let err = store.load().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidFormat);
        assert_eq!(store.status(), LoadStatus::Failed);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_view_uses_configured_page_size() {
        let mut config = Config::default();
        config.pagination.page_size = 3;
        let mut store = RecordStore::new(&config, Arc::new(StaticSource::new(sample())));
        store.load().await.unwrap();

        let view = store.view(ViewState::default());
        assert_eq!(view.visible_page().len(), 3);
        assert_eq!(view.total_pages(), 2);
    }

    #[tokio::test]
    async fn test_stats() {
        let mut store = store(sample());
        store.load().await.unwrap();

        let stats = store.stats();
        assert_eq!(stats.total_records, 4);
        assert_eq!(stats.distinct_dates, 3);
        assert_eq!(stats.distinct_names, 3);
        assert_eq!(stats.date_range_start.as_deref(), Some("2024-01-15"));
        assert_eq!(stats.date_range_end.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn test_stats_empty() {
        let stats = store(Vec::new()).stats();
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.date_range_start, None);
    }
}
