//! The transaction edit record

use serde::{Deserialize, Serialize};

/// One transaction edit: who changed which field of which entry, and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub date: String,
    pub name: String,
    pub title: String,
    pub field: String,
    pub old_value: String,
    pub new_value: String,
}

impl Record {
    pub fn new(
        date: impl Into<String>,
        name: impl Into<String>,
        title: impl Into<String>,
        field: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            name: name.into(),
            title: title.into(),
            field: field.into(),
            old_value: old_value.into(),
            new_value: new_value.into(),
        }
    }
}
