//! Record lists with a complete source and a decorated view
//!
//! The interactive grid reads [`RecordList::view`], which applies the current
//! filters, sort and page. Export and print read [`RecordList::source`], which
//! always returns every record in generation order.

use std::cmp::Ordering;

use crate::models::{lookup, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub key: String,
    pub direction: SortDirection,
}

/// Case-insensitive "contains" match on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub key: String,
    pub needle: String,
}

impl Filter {
    fn matches(&self, record: &dyn Record) -> bool {
        let needle = self.needle.to_lowercase();
        lookup(record, &self.key)
            .map(|value| value.to_lowercase().contains(&needle))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

/// Interactive state of a grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub filters: Vec<Filter>,
    pub sort: Option<Sort>,
    pub page: Option<Page>,
}

impl ListState {
    pub fn filter(mut self, key: impl Into<String>, needle: impl Into<String>) -> Self {
        self.filters.push(Filter {
            key: key.into(),
            needle: needle.into(),
        });
        self
    }

    pub fn sort(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(Sort {
            key: key.into(),
            direction,
        });
        self
    }

    pub fn page(mut self, offset: usize, limit: usize) -> Self {
        self.page = Some(Page { offset, limit });
        self
    }

    pub fn is_active(&self) -> bool {
        !self.filters.is_empty() || self.sort.is_some() || self.page.is_some()
    }
}

/// Compare two cell values, numerically when both parse as integers
fn compare_values(a: Option<String>, b: Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.parse::<i64>(), b.parse::<i64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            _ => a.to_lowercase().cmp(&b.to_lowercase()),
        },
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

/// Generated records plus the grid state applied on top of them
#[derive(Debug, Clone)]
pub struct RecordList<R> {
    records: Vec<R>,
    state: ListState,
}

impl<R: Record> RecordList<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            state: ListState::default(),
        }
    }

    pub fn with_state(mut self, state: ListState) -> Self {
        self.state = state;
        self
    }

    pub fn set_state(&mut self, state: ListState) {
        self.state = state;
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Every record, ignoring filters, sort and paging
    pub fn source(&self) -> &[R] {
        &self.records
    }

    /// Records as the grid currently shows them
    pub fn view(&self) -> Vec<&R> {
        let mut visible: Vec<&R> = self
            .records
            .iter()
            .filter(|r| self.state.filters.iter().all(|f| f.matches(*r)))
            .collect();

        if let Some(sort) = &self.state.sort {
            visible.sort_by(|a, b| {
                let ord = compare_values(lookup(*a, &sort.key), lookup(*b, &sort.key));
                match sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        match self.state.page {
            Some(page) => visible
                .into_iter()
                .skip(page.offset)
                .take(page.limit)
                .collect(),
            None => visible,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}
