//! Column definitions shared by the grid, export and print paths

use std::fmt;
use std::sync::Arc;

use crate::models::{lookup, Record};

/// Computes a cell from a record (or its related sub-record)
pub type Resolver = Arc<dyn Fn(&dyn Record) -> String + Send + Sync>;

/// A single report column
#[derive(Clone)]
pub enum Column {
    /// Value read straight from the record field named by `key`
    Direct { key: String, label: String },
    /// Value produced by `resolver`, which receives the relation named by
    /// `key` when the record has one, otherwise the record itself
    Computed {
        key: String,
        label: String,
        resolver: Resolver,
    },
}

impl Column {
    pub fn direct(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Direct {
            key: key.into(),
            label: label.into(),
        }
    }

    pub fn computed<F>(key: impl Into<String>, label: impl Into<String>, resolver: F) -> Self
    where
        F: Fn(&dyn Record) -> String + Send + Sync + 'static,
    {
        Self::Computed {
            key: key.into(),
            label: label.into(),
            resolver: Arc::new(resolver),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Direct { key, .. } | Self::Computed { key, .. } => key,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Direct { label, .. } | Self::Computed { label, .. } => label,
        }
    }

    /// Header cell for delimited export: computed columns are headed by their key
    pub fn export_header(&self) -> &str {
        match self {
            Self::Direct { label, .. } => label,
            Self::Computed { key, .. } => key,
        }
    }

    /// Cell value for `record`; absent fields render empty
    pub fn resolve(&self, record: &dyn Record) -> String {
        match self {
            Self::Direct { key, .. } => lookup(record, key).unwrap_or_default(),
            Self::Computed { key, resolver, .. } => {
                let target = record.related(key).unwrap_or(record);
                resolver(target)
            }
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct { key, label } => f
                .debug_struct("Direct")
                .field("key", key)
                .field("label", label)
                .finish(),
            Self::Computed { key, label, .. } => f
                .debug_struct("Computed")
                .field("key", key)
                .field("label", label)
                .finish_non_exhaustive(),
        }
    }
}

/// An ordered, immutable set of columns
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key() == key)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.columns.iter().map(Column::key).collect()
    }

    /// (key, label) pairs in display order
    pub fn labels(&self) -> Vec<(&str, &str)> {
        self.columns.iter().map(|c| (c.key(), c.label())).collect()
    }
}

impl FromIterator<Column> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
