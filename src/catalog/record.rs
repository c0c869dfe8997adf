//! A single catalog entry.

use serde::{Deserialize, Serialize};

use super::DEFAULT_CATEGORY;

/// One tool listed in the catalog document.
///
/// Records are immutable once built: `name` and `url` are guaranteed
/// non-empty and `category` always has a value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolRecord {
    name: String,
    url: String,
    category: String,
    description: String,
    #[serde(default)]
    id: String,
}

impl ToolRecord {
    /// Build a record, returning `None` when `name` or `url` is empty.
    ///
    /// An empty `category` falls back to [`DEFAULT_CATEGORY`].
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Option<Self> {
        let name = name.into();
        let url = url.into();
        if name.is_empty() || url.is_empty() {
            return None;
        }

        let category = category.into();
        let category = if category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category
        };

        Some(Self {
            name,
            url,
            category,
            description: description.into(),
            id: String::new(),
        })
    }

    /// Attach the anchor identifier from `<a name="...">`.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Anchor identifier; empty when the entry had none.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_name_or_url() {
        assert!(ToolRecord::new("", "http://a.example", "Aligners", "").is_none());
        assert!(ToolRecord::new("ToolA", "", "Aligners", "").is_none());
        assert!(ToolRecord::new("ToolA", "http://a.example", "Aligners", "").is_some());
    }

    #[test]
    fn test_empty_category_falls_back() {
        let record = ToolRecord::new("ToolA", "http://a.example", "  ", "desc").unwrap();
        assert_eq!(record.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_with_id() {
        let record = ToolRecord::new("ToolA", "http://a.example", "Aligners", "")
            .unwrap()
            .with_id("toola");
        assert!(record.has_id());
        assert_eq!(record.id(), "toola");
    }

    #[test]
    fn test_serde_shape() {
        let record = ToolRecord::new("ToolA", "http://a.example", "Aligners", "Fast").unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "ToolA");
        assert_eq!(json["url"], "http://a.example");
        assert_eq!(json["category"], "Aligners");
        assert_eq!(json["description"], "Fast");
        assert_eq!(json["id"], "");
    }
}
