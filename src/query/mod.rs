//! Search and category filtering over parsed records.
//!
//! Filtering never mutates or reorders records: a [`Selection`] borrows the
//! matching records from the catalog in their original order.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ToolRecord};

/// Sentinel selecting every category.
pub const ALL_CATEGORIES: &str = "All";

/// Category restriction applied by a [`Query`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive category name.
    Named(String),
}

impl CategoryFilter {
    pub fn named(category: impl Into<String>) -> Self {
        Self::Named(category.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn matches(&self, record: &ToolRecord) -> bool {
        match self {
            Self::All => true,
            Self::Named(category) => record.category() == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(category) => category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Named(category) => category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text search plus category restriction, combined with AND.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    text: String,
    needle: String,
    category: CategoryFilter,
}

impl Query {
    /// Query matching every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text. Matching is case-insensitive.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.needle = self.text.to_lowercase();
        self
    }

    pub fn category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn search_text(&self) -> &str {
        &self.text
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.category
    }

    /// True when neither the text nor the category restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        self.needle.is_empty() && self.category.is_all()
    }

    /// Whether the search text occurs in the record's name, description or
    /// category.
    pub fn matches_text(&self, record: &ToolRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        [record.name(), record.description(), record.category()]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }

    pub fn matches(&self, record: &ToolRecord) -> bool {
        self.category.matches(record) && self.matches_text(record)
    }

    /// Select matching records, preserving input order.
    pub fn apply<'a>(&self, records: &'a [ToolRecord]) -> Selection<'a> {
        Selection {
            records: records.iter().filter(|r| self.matches(r)).collect(),
        }
    }
}

/// Filter `records` by search text and category.
///
/// `category` is either the `"All"` sentinel or an exact category name.
pub fn filter<'a>(
    records: &'a [ToolRecord],
    query: &str,
    category: impl Into<CategoryFilter>,
) -> Vec<&'a ToolRecord> {
    Query::new()
        .text(query)
        .category(category)
        .apply(records)
        .into_records()
}

/// Records selected by a [`Query`], in catalog order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection<'a> {
    records: Vec<&'a ToolRecord>,
}

impl<'a> Selection<'a> {
    pub fn records(&self) -> &[&'a ToolRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// An empty selection means "adjust the filters", not a failure.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ToolRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn into_records(self) -> Vec<&'a ToolRecord> {
        self.records
    }
}

/// Aggregate counts shown alongside a selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// All records in the catalog.
    pub total: usize,
    /// Distinct categories in the catalog.
    pub categories: usize,
    /// Records in the selected category, ignoring the search text.
    pub showing: usize,
}

impl Summary {
    pub fn compute(catalog: &Catalog, category: &CategoryFilter) -> Self {
        let showing = match category {
            CategoryFilter::All => catalog.len(),
            CategoryFilter::Named(name) => catalog.categories().get(name).len(),
        };
        Self {
            total: catalog.len(),
            categories: catalog.categories().len(),
            showing,
        }
    }
}
