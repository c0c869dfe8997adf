//! Layered configuration: providers are consulted in order and the first
//! one holding a key wins.

use std::collections::BTreeSet;

use super::ConfigResult;
use super::provider::ConfigProvider;

#[derive(Default)]
pub struct CompositeConfigProvider {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl CompositeConfigProvider {
    /// Create a composite with no providers; every key reads as unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider below those already present.
    pub fn add_provider(&mut self, provider: Box<dyn ConfigProvider>) {
        self.providers.push(provider);
    }

    /// Builder form of [`add_provider`](Self::add_provider).
    pub fn provider(mut self, provider: Box<dyn ConfigProvider>) -> Self {
        self.add_provider(provider);
        self
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

#[async_trait::async_trait]
impl ConfigProvider for CompositeConfigProvider {
    fn name(&self) -> &str {
        "composite"
    }

    async fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        for provider in &self.providers {
            if let Some(value) = provider.get_raw(key).await? {
                tracing::trace!(key, provider = provider.name(), "config value resolved");
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    async fn list_keys(&self, prefix: &str) -> ConfigResult<Vec<String>> {
        let mut keys = BTreeSet::new();
        for provider in &self.providers {
            keys.extend(provider.list_keys(prefix).await?);
        }
        Ok(keys.into_iter().collect())
    }
}

impl std::fmt::Debug for CompositeConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeConfigProvider")
            .field("provider_names", &self.provider_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::EnvConfigProvider;
    use crate::config::memory::MemoryConfigProvider;

    #[tokio::test]
    async fn test_first_provider_wins() {
        let overrides = MemoryConfigProvider::named("overrides").value("view.mode", "table");
        let defaults = MemoryConfigProvider::named("defaults")
            .value("view.mode", "cards")
            .value("document.path", "README.md");

        let composite = CompositeConfigProvider::new()
            .provider(Box::new(overrides))
            .provider(Box::new(defaults));

        assert_eq!(composite.provider_names(), vec!["overrides", "defaults"]);
        assert_eq!(
            composite.get_raw("view.mode").await.unwrap(),
            Some("table".to_string())
        );
        assert_eq!(
            composite.get_raw("document.path").await.unwrap(),
            Some("README.md".to_string())
        );
        assert_eq!(composite.get_raw("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_keys_is_deduplicated() {
        let a = MemoryConfigProvider::named("a").value("kanban.max_cards", "1");
        let b = MemoryConfigProvider::named("b")
            .value("kanban.max_cards", "2")
            .value("kanban.max_columns", "3");

        let composite = CompositeConfigProvider::new()
            .provider(Box::new(a))
            .provider(Box::new(b));
        let keys = composite.list_keys("kanban.").await.unwrap();
        assert_eq!(keys, vec!["kanban.max_cards", "kanban.max_columns"]);
    }

    #[tokio::test]
    async fn test_unset_env_falls_through() {
        let memory = MemoryConfigProvider::named("memory").value("view.mode", "table");
        let composite = CompositeConfigProvider::new()
            .provider(Box::new(EnvConfigProvider::prefixed("CATALOG_COMPOSITE_TEST_")))
            .provider(Box::new(memory));

        assert_eq!(composite.provider_count(), 2);
        assert_eq!(
            composite.get_raw("view.mode").await.unwrap(),
            Some("table".to_string())
        );
    }
}
