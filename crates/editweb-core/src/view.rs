//! View state: filters, sort column, sort direction and current page

use editweb_source::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::CoreError;

/// Text filters; an empty value means "no constraint"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub name: String,
    pub date: String,
    pub title: String,
}

impl Filters {
    pub fn new(name: impl Into<String>, date: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            title: title.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.date.is_empty() && self.title.is_empty()
    }

    /// Check a record against every active filter
    ///
    /// Name and title match as case-insensitive substrings, date matches exactly.
    pub fn matches(&self, record: &Record) -> bool {
        contains_ignore_case(&record.name, &self.name)
            && (self.date.is_empty() || record.date == self.date)
            && contains_ignore_case(&record.title, &self.title)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Sortable table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    #[default]
    Date,
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Date, SortKey::Name, SortKey::Title];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Date => "date",
            SortKey::Title => "title",
        }
    }

    /// The record field this column sorts on
    pub fn value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            SortKey::Name => &record.name,
            SortKey::Date => &record.date,
            SortKey::Title => &record.title,
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "date" => Ok(SortKey::Date),
            "title" => Ok(SortKey::Title),
            _ => Err(CoreError::InvalidSortKey { key: s.to_string() }),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort direction, carried in the URL as `1` / `-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Map the direction selector value; only "asc" means ascending
    pub fn from_select_value(value: &str) -> Self {
        if value == "asc" {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }

    pub fn multiplier(&self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply the direction to an ascending comparison result
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn select_value(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Everything that decides which rows are visible
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub filters: Filters,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filters: Filters::default(),
            sort_key: SortKey::Date,
            sort_direction: SortDirection::Ascending,
            current_page: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, name: &str, title: &str) -> Record {
        Record::new(date, name, title, "amount", "1", "2")
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let filters = Filters::default();
        assert!(filters.is_empty());
        assert!(filters.matches(&record("2024-01-01", "Alice", "Invoice")));
    }

    #[test]
    fn test_name_and_title_match_case_insensitive_substring() {
        let r = record("2024-01-01", "Alice Martin", "Quarterly Invoice");
        assert!(Filters::new("MART", "", "").matches(&r));
        assert!(Filters::new("", "", "invoice").matches(&r));
        assert!(!Filters::new("bob", "", "").matches(&r));
    }

    #[test]
    fn test_date_matches_exactly() {
        let r = record("2024-01-01", "Alice", "Invoice");
        assert!(Filters::new("", "2024-01-01", "").matches(&r));
        assert!(!Filters::new("", "2024-01", "").matches(&r));
        assert!(!Filters::new("", "2024-01-01 ", "").matches(&r));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let r = record("2024-01-01", "Alice", "Invoice");
        assert!(Filters::new("ali", "2024-01-01", "inv").matches(&r));
        assert!(!Filters::new("ali", "2024-01-02", "inv").matches(&r));
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("title".parse::<SortKey>().unwrap(), SortKey::Title);
        assert!("amount".parse::<SortKey>().is_err());
        assert!("Name".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Name.to_string(), "name");
    }

    #[test]
    fn test_direction_select_value() {
        assert_eq!(SortDirection::from_select_value("asc"), SortDirection::Ascending);
        assert_eq!(SortDirection::from_select_value("desc"), SortDirection::Descending);
        assert_eq!(SortDirection::from_select_value("sideways"), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.multiplier(), -1);
        assert_eq!(SortDirection::Descending.apply(Ordering::Less), Ordering::Greater);
    }

    #[test]
    fn test_default_state() {
        let state = ViewState::default();
        assert!(state.filters.is_empty());
        assert_eq!(state.sort_key, SortKey::Date);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
        assert_eq!(state.current_page, 1);
    }
}
