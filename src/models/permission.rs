//! Permission catalog models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name shown for a catalog entry that has no name of its own
pub const UNKNOWN_PERMISSION_NAME: &str = "Unknown";

/// A single permission definition in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default)]
    pub sort: i32,
}

impl CatalogEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The human-readable name, or "Unknown" when the entry has none
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_PERMISSION_NAME,
        }
    }
}

/// A named category of permission codes, e.g. "Roles and access permissions"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCategory {
    pub name: String,
    /// Entries keyed by uppercased permission code
    #[serde(default)]
    pub entries: HashMap<String, CatalogEntry>,
}

impl PermissionCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    pub fn with_entry(mut self, code: &str, entry: CatalogEntry) -> Self {
        self.entries.insert(code.to_uppercase(), entry);
        self
    }

    fn normalized(self) -> Self {
        Self {
            name: self.name,
            entries: self
                .entries
                .into_iter()
                .map(|(code, entry)| (code.to_uppercase(), entry))
                .collect(),
        }
    }
}

/// The system-wide permission catalog, in category order
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(from = "Vec<PermissionCategory>", into = "Vec<PermissionCategory>")]
pub struct PermissionCatalog {
    categories: Vec<PermissionCategory>,
}

impl From<Vec<PermissionCategory>> for PermissionCatalog {
    fn from(categories: Vec<PermissionCategory>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(PermissionCategory::normalized)
                .collect(),
        }
    }
}

impl From<PermissionCatalog> for Vec<PermissionCategory> {
    fn from(catalog: PermissionCatalog) -> Self {
        catalog.categories
    }
}

impl PermissionCatalog {
    pub fn new(categories: Vec<PermissionCategory>) -> Self {
        categories.into()
    }

    pub fn categories(&self) -> &[PermissionCategory] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.entries.is_empty())
    }

    /// Every entry defining `code`, one per category that lists it, in category order.
    ///
    /// `code` must already be uppercased.
    pub fn entries_for<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.categories
            .iter()
            .filter_map(move |category| category.entries.get(code))
    }
}
