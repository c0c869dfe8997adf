//! JSON file configuration.
//!
//! ```json
//! { "document": { "path": "README.md" }, "kanban": { "max_columns": 4 } }
//! ```
//!
//! Nested objects are addressed with dotted keys. A missing file reads as
//! empty.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::ConfigResult;
use super::provider::ConfigProvider;

pub struct FileConfigProvider {
    path: PathBuf,
    data: RwLock<Option<Map<String, Value>>>,
}

impl FileConfigProvider {
    /// Create a provider for `path`. The file is read on first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> ConfigResult<Map<String, Value>> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Map::new());
        }
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn ensure_loaded(&self) -> ConfigResult<()> {
        let mut data = self.data.write().await;
        if data.is_none() {
            *data = Some(self.load().await?);
        }
        Ok(())
    }

    /// Discard cached contents and re-read the file.
    pub async fn reload(&self) -> ConfigResult<()> {
        let fresh = self.load().await?;
        *self.data.write().await = Some(fresh);
        Ok(())
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(key) {
        return Some(value);
    }
    let mut parts = key.split('.');
    let first = map.get(parts.next()?)?;
    parts.try_fold(first, |value, part| value.get(part))
}

/// Collect dotted paths of every non-object value under `map`.
fn flatten_keys(map: &Map<String, Value>, parent: Option<&str>, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = match parent {
            Some(parent) => format!("{}.{}", parent, key),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => flatten_keys(nested, Some(&path), out),
            _ => out.push(path),
        }
    }
}

#[async_trait::async_trait]
impl ConfigProvider for FileConfigProvider {
    fn name(&self) -> &str {
        "file"
    }

    async fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        self.ensure_loaded().await?;
        let data = self.data.read().await;
        let value = data.as_ref().and_then(|map| lookup(map, key));
        Ok(value.map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    async fn list_keys(&self, prefix: &str) -> ConfigResult<Vec<String>> {
        self.ensure_loaded().await?;
        let data = self.data.read().await;
        let mut keys = Vec::new();
        if let Some(map) = data.as_ref() {
            flatten_keys(map, None, &mut keys);
        }
        keys.retain(|k| k.starts_with(prefix));
        Ok(keys)
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .finish()
    }
}
