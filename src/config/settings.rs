//! Typed explorer settings resolved from any [`ConfigProvider`].

use serde::{Deserialize, Serialize};

use super::provider::{ConfigProvider, ConfigProviderExt};
use super::{ConfigError, ConfigResult, ValidationErrors};
use crate::source::{DEFAULT_DOCUMENT_PATH, DocumentSource};
use crate::view::{KanbanLimits, ViewMode};

pub const KEY_DOCUMENT_PATH: &str = "document.path";
pub const KEY_VIEW_MODE: &str = "view.mode";
pub const KEY_KANBAN_MAX_COLUMNS: &str = "kanban.max_columns";
pub const KEY_KANBAN_MAX_CARDS: &str = "kanban.max_cards";
pub const KEY_KANBAN_EXCERPT_CHARS: &str = "kanban.excerpt_chars";
pub const KEY_CACHE_ENABLED: &str = "cache.enabled";

/// Everything the explorer needs to know before loading a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerSettings {
    /// Where the catalog is read from (`document.path`).
    pub document: DocumentSource,
    /// Initial layout (`view.mode`).
    pub view_mode: ViewMode,
    /// Board caps (`kanban.*`).
    pub kanban: KanbanLimits,
    /// Whether unchanged documents reuse the previous parse (`cache.enabled`).
    pub cache_enabled: bool,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            document: DocumentSource::file(DEFAULT_DOCUMENT_PATH),
            view_mode: ViewMode::default(),
            kanban: KanbanLimits::default(),
            cache_enabled: true,
        }
    }
}

impl ExplorerSettings {
    /// Resolve settings from `provider`, using defaults for unset keys.
    ///
    /// All invalid values are reported together.
    pub async fn load<P: ConfigProvider + ?Sized>(provider: &P) -> ConfigResult<Self> {
        let defaults = Self::default();
        let mut errors = Vec::new();

        let document = match provider.get::<String>(KEY_DOCUMENT_PATH).await? {
            Some(location) if location.trim().is_empty() => {
                errors.push(invalid(KEY_DOCUMENT_PATH, "must not be empty"));
                defaults.document
            }
            Some(location) => DocumentSource::from_location(location.trim()),
            None => defaults.document,
        };

        let view_mode = match provider.get::<String>(KEY_VIEW_MODE).await? {
            Some(raw) => raw.parse::<ViewMode>().unwrap_or_else(|e| {
                errors.push(invalid(KEY_VIEW_MODE, e.to_string()));
                defaults.view_mode
            }),
            None => defaults.view_mode,
        };

        let mut kanban = defaults.kanban;
        for (key, slot) in [
            (KEY_KANBAN_MAX_COLUMNS, &mut kanban.max_columns),
            (KEY_KANBAN_MAX_CARDS, &mut kanban.max_cards),
            (KEY_KANBAN_EXCERPT_CHARS, &mut kanban.excerpt_chars),
        ] {
            match provider.get::<usize>(key).await {
                Ok(Some(0)) => errors.push(invalid(key, "must be greater than zero")),
                Ok(Some(value)) => *slot = value,
                Ok(None) => {}
                Err(e) => errors.push(e),
            }
        }

        let cache_enabled = match provider.get::<bool>(KEY_CACHE_ENABLED).await {
            Ok(value) => value.unwrap_or(defaults.cache_enabled),
            Err(e) => {
                errors.push(e);
                defaults.cache_enabled
            }
        };

        if !errors.is_empty() {
            return Err(ConfigError::ValidationErrors(ValidationErrors(errors)));
        }

        let settings = Self {
            document,
            view_mode,
            kanban,
            cache_enabled,
        };
        tracing::debug!(
            provider = provider.name(),
            document = %settings.document,
            view_mode = %settings.view_mode,
            "resolved explorer settings"
        );
        Ok(settings)
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}
