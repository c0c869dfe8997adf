//! Grouping of records by category.

use std::collections::HashMap;

use super::ToolRecord;

/// Records grouped by category name.
///
/// Categories keep the order in which they first appeared in the document;
/// records inside a category keep document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    order: Vec<String>,
    buckets: HashMap<String, Vec<ToolRecord>>,
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the bucket named by its category.
    pub(crate) fn insert(&mut self, record: ToolRecord) {
        match self.buckets.get_mut(record.category()) {
            Some(bucket) => bucket.push(record),
            None => {
                let category = record.category().to_string();
                self.order.push(category.clone());
                self.buckets.insert(category, vec![record]);
            }
        }
    }

    /// Records of `category`, or an empty slice when it is unknown.
    pub fn get(&self, category: &str) -> &[ToolRecord] {
        self.buckets.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, category: &str) -> bool {
        self.buckets.contains_key(category)
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Category names in first-appearance order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Category names sorted alphabetically, for selectors.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        names
    }

    /// `(category, records)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ToolRecord])> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.get(name)))
    }
}
