//! Transaction edit records and where they come from
//!
//! The viewer consumes a flat JSON array of records. How that array is
//! served is hidden behind [`RecordSource`].

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub mod error;
pub mod record;

pub use error::SourceError;
pub use record::Record;

/// Source reference type
pub type SourceRef = Arc<dyn RecordSource>;

/// Parse a JSON array of records
pub fn parse_records(content: &str, location: &str) -> Result<Vec<Record>, SourceError> {
    serde_json::from_str(content).map_err(|e| SourceError::Malformed {
        location: location.to_string(),
        message: e.to_string(),
    })
}

// ==================== Source Trait ====================

/// Something that can supply the full record set once per load
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Human-readable location, used in logs
    fn describe(&self) -> String;

    /// Fetch and parse every record, in source order
    async fn load(&self) -> Result<Vec<Record>, SourceError>;
}

/// Records stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<Record>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound {
                location: self.describe(),
            },
            _ => SourceError::IoError(e),
        })?;

        let records = parse_records(&content, &self.describe())?;
        log::debug!("Parsed {} records from {}", records.len(), self.describe());
        Ok(records)
    }
}

/// Records held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Record>,
}

impl StaticSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    fn describe(&self) -> String {
        format!("memory ({} records)", self.records.len())
    }

    async fn load(&self) -> Result<Vec<Record>, SourceError> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {"date": "2024-01-02", "name": "Alice", "title": "Invoice 7", "field": "amount", "old_value": "10", "new_value": "12"},
        {"date": "2024-01-01", "name": "Bob", "title": "Refund", "field": "status", "old_value": "open", "new_value": "closed"}
    ]"#;

    #[test]
    fn test_parse_records_keeps_order() {
        let records = parse_records(SAMPLE, "sample").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Alice");
        assert_eq!(records[1].old_value, "open");
    }

    #[test]
    fn test_parse_records_missing_field() {
        let err = parse_records(r#"[{"date": "2024-01-01"}]"#, "broken.json").unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[tokio::test]
    async fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = JsonFileSource::new(file.path());
        let records = source.load().await.unwrap();
        assert_eq!(records[1], Record::new("2024-01-01", "Bob", "Refund", "status", "open", "closed"));
    }

    #[tokio::test]
    async fn test_json_file_source_missing() {
        let source = JsonFileSource::new("/nonexistent/records.json");
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::new(vec![Record::new("d", "n", "t", "f", "o", "v")]);
        assert_eq!(source.load().await.unwrap().len(), 1);
        assert!(source.describe().contains("1 records"));
    }
}
