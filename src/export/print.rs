//! Print-ready document model

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::Record;
use crate::report::{ColumnSet, RecordList};

/// Format used for generation timestamps in print output and descriptions
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Who and what is being printed
#[derive(Debug, Clone, Default)]
pub struct PrintMeta {
    pub title: String,
    pub printed_by: Option<String>,
    pub include_header: bool,
}

impl PrintMeta {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            printed_by: None,
            include_header: true,
        }
    }

    pub fn printed_by(mut self, name: impl Into<String>) -> Self {
        self.printed_by = Some(name.into());
        self
    }

    pub fn without_header(mut self) -> Self {
        self.include_header = false;
        self
    }
}

/// A report rendered to plain cells, ready for a print template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrintDocument {
    pub title: String,
    pub generated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub printed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

/// Build a print model from every record in `list`, stamped with the current local time
pub fn build_print_model<R: Record>(list: &RecordList<R>, columns: &ColumnSet, meta: &PrintMeta) -> PrintDocument {
    build_print_model_at(list, columns, meta, Local::now().naive_local())
}

pub fn build_print_model_at<R: Record>(
    list: &RecordList<R>,
    columns: &ColumnSet,
    meta: &PrintMeta,
    generated_at: NaiveDateTime,
) -> PrintDocument {
    let header: Option<Vec<String>> = meta
        .include_header
        .then(|| columns.iter().map(|c| c.label().to_string()).collect());

    let rows: Vec<Vec<String>> = list
        .source()
        .iter()
        .map(|record| columns.iter().map(|c| c.resolve(record)).collect())
        .collect();

    tracing::debug!("Built print model '{}' with {} rows", meta.title, list.len());

    PrintDocument {
        title: meta.title.clone(),
        generated_at: generated_at.format(TIMESTAMP_FORMAT).to_string(),
        printed_by: meta.printed_by.clone(),
        header,
        rows,
    }
}
