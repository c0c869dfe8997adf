//! In-memory configuration, for code-defined settings and tests.

use std::collections::HashMap;

use super::ConfigResult;
use super::provider::ConfigProvider;

#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    data: HashMap<String, String>,
    name: String,
}

impl MemoryConfigProvider {
    /// Create an empty provider named `memory`.
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// Create an empty provider with a custom name, e.g. `overrides`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            data: HashMap::new(),
            name: name.into(),
        }
    }

    /// Add a value; raw strings are decoded like any other provider's.
    pub fn value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<HashMap<String, String>> for MemoryConfigProvider {
    fn from(data: HashMap<String, String>) -> Self {
        Self {
            data,
            name: "memory".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ConfigProvider for MemoryConfigProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    async fn list_keys(&self, prefix: &str) -> ConfigResult<Vec<String>> {
        Ok(self
            .data
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::provider::ConfigProviderExt;

    #[tokio::test]
    async fn test_builder_values() {
        let provider = MemoryConfigProvider::new()
            .value("view.mode", "kanban")
            .value("kanban.max_cards", "3");

        assert_eq!(provider.len(), 2);
        assert_eq!(
            provider.get_raw("view.mode").await.unwrap(),
            Some("kanban".to_string())
        );
        let cards: Option<usize> = provider.get("kanban.max_cards").await.unwrap();
        assert_eq!(cards, Some(3));
    }

    #[tokio::test]
    async fn test_list_keys() {
        let provider = MemoryConfigProvider::named("overrides");
        assert_eq!(provider.name(), "overrides");
        assert!(provider.is_empty());

        let provider = provider
            .value("kanban.max_cards", "4")
            .value("kanban.max_columns", "2")
            .value("document.path", "TOOLS.md");

        let mut keys = provider.list_keys("kanban.").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["kanban.max_cards", "kanban.max_columns"]);
    }

    #[tokio::test]
    async fn test_get_or() {
        let provider = MemoryConfigProvider::new().value("cache.enabled", "false");
        let enabled: bool = provider.get_or("cache.enabled", true).await.unwrap();
        assert!(!enabled);

        let missing: usize = provider.get_or("kanban.max_cards", 10).await.unwrap();
        assert_eq!(missing, 10);
    }

    #[tokio::test]
    async fn test_from_map() {
        let mut data = HashMap::new();
        data.insert("document.path".to_string(), "README.md".to_string());
        let provider = MemoryConfigProvider::from(data);
        assert_eq!(provider.len(), 1);
    }
}
