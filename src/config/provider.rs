//! Configuration provider trait.

use serde::de::DeserializeOwned;

use super::{ConfigError, ConfigResult};

/// A read-only source of string-valued settings addressed by dotted keys
/// (`document.path`, `kanban.max_columns`).
#[async_trait::async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Raw value for `key`, or `None` when this provider does not set it.
    async fn get_raw(&self, key: &str) -> ConfigResult<Option<String>>;

    /// Dotted keys starting with `prefix`.
    async fn list_keys(&self, prefix: &str) -> ConfigResult<Vec<String>>;
}

/// Typed access on top of [`ConfigProvider`].
pub trait ConfigProviderExt: ConfigProvider {
    /// Get a typed value.
    ///
    /// The raw value is decoded as JSON first; if that fails it is decoded
    /// as a bare JSON string, so `kanban` and `"kanban"` both work.
    fn get<T: DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = ConfigResult<Option<T>>> + Send
    where
        Self: Sync,
    {
        async move {
            let Some(raw) = self.get_raw(key).await? else {
                return Ok(None);
            };
            decode(key, &raw).map(Some)
        }
    }

    /// Get a typed value, falling back to `default` when the key is unset.
    fn get_or<T: DeserializeOwned + Send>(
        &self,
        key: &str,
        default: T,
    ) -> impl std::future::Future<Output = ConfigResult<T>> + Send
    where
        Self: Sync,
    {
        async move { Ok(self.get(key).await?.unwrap_or(default)) }
    }
}

impl<P: ConfigProvider + ?Sized> ConfigProviderExt for P {}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> ConfigResult<T> {
    serde_json::from_str(raw)
        .or_else(|_| serde_json::from_value(serde_json::Value::String(raw.to_string())))
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_json_and_bare_strings() {
        assert_eq!(decode::<usize>("k", "6").unwrap(), 6);
        assert!(decode::<bool>("k", "false").is_ok_and(|v| !v));
        assert_eq!(decode::<String>("k", "\"README.md\"").unwrap(), "README.md");
        assert_eq!(decode::<String>("k", "README.md").unwrap(), "README.md");
    }

    #[test]
    fn test_decode_reports_key() {
        let err = decode::<usize>("kanban.max_cards", "many").unwrap_err();
        assert!(err.to_string().contains("kanban.max_cards"));
    }
}
