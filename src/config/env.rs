//! Environment variable configuration.
//!
//! Keys map to variables by upper-casing and replacing dots with
//! underscores under a prefix: `document.path` -> `CATALOG_DOCUMENT_PATH`.

use super::provider::ConfigProvider;
use super::{ConfigError, ConfigResult};

/// Prefix used by [`EnvConfigProvider::default`].
pub const DEFAULT_ENV_PREFIX: &str = "CATALOG_";

#[derive(Debug, Clone)]
pub struct EnvConfigProvider {
    prefix: String,
}

impl EnvConfigProvider {
    /// Provider reading `CATALOG_*` variables.
    pub fn new() -> Self {
        Self::prefixed(DEFAULT_ENV_PREFIX)
    }

    /// Provider reading variables under a custom prefix.
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn env_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key.to_uppercase().replace('.', "_"))
    }

    fn key_from_env(&self, env_name: &str) -> Option<String> {
        env_name
            .strip_prefix(&self.prefix)
            .map(|rest| rest.to_lowercase().replace('_', "."))
    }
}

impl Default for EnvConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ConfigProvider for EnvConfigProvider {
    fn name(&self) -> &str {
        "env"
    }

    async fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        match std::env::var(self.env_key(key)) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(ConfigError::Env(e)),
        }
    }

    async fn list_keys(&self, prefix: &str) -> ConfigResult<Vec<String>> {
        let env_prefix = self.env_key(prefix);
        Ok(std::env::vars()
            .filter(|(k, _)| k.starts_with(&env_prefix))
            .filter_map(|(k, _)| self.key_from_env(&k))
            .collect())
    }
}
