//! Pluggable configuration for the explorer.
//!
//! ```rust,no_run
//! use catalog_explorer::config::{ConfigBuilder, ExplorerSettings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigBuilder::new()
//!     .env()
//!     .file("catalog.json")
//!     .build();
//! let settings = ExplorerSettings::load(&config).await?;
//! println!("catalog: {}", settings.document);
//! # Ok(())
//! # }
//! ```

pub mod composite;
pub mod env;
pub mod file;
pub mod memory;
pub mod provider;
pub mod settings;

pub use composite::CompositeConfigProvider;
pub use env::{DEFAULT_ENV_PREFIX, EnvConfigProvider};
pub use file::FileConfigProvider;
pub use memory::MemoryConfigProvider;
pub use provider::{ConfigProvider, ConfigProviderExt};
pub use settings::ExplorerSettings;

use thiserror::Error;

/// Errors that can occur in configuration operations
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value is present but cannot be used for its key.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The dotted key, e.g. `kanban.max_cards`
        key: String,
        /// What was wrong with the value
        message: String,
    },

    /// The settings file is not valid JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The settings file exists but could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An environment variable is set but not valid unicode.
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),

    /// Every invalid value found while resolving settings.
    #[error("{0}")]
    ValidationErrors(ValidationErrors),
}

/// Errors collected by [`ExplorerSettings::load`].
#[derive(Debug)]
pub struct ValidationErrors(pub Vec<ConfigError>);

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msgs: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "Validation failed: {}", msgs.join("; "))
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Stacks providers; the first one added has the highest priority.
#[derive(Default)]
pub struct ConfigBuilder {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl ConfigBuilder {
    /// Create a builder with no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// `CATALOG_*` environment variables.
    pub fn env(self) -> Self {
        self.provider(Box::new(EnvConfigProvider::new()))
    }

    /// Environment variables under a custom prefix.
    pub fn env_prefixed(self, prefix: &str) -> Self {
        self.provider(Box::new(EnvConfigProvider::prefixed(prefix)))
    }

    /// JSON settings file; a missing file contributes nothing.
    pub fn file(self, path: impl AsRef<std::path::Path>) -> Self {
        self.provider(Box::new(FileConfigProvider::new(path.as_ref())))
    }

    pub fn memory(self, provider: MemoryConfigProvider) -> Self {
        self.provider(Box::new(provider))
    }

    /// Any other provider, below those already added.
    pub fn provider(mut self, provider: Box<dyn ConfigProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Stack the providers into one [`CompositeConfigProvider`].
    pub fn build(self) -> CompositeConfigProvider {
        self.providers
            .into_iter()
            .fold(CompositeConfigProvider::new(), |composite, provider| {
                composite.provider(provider)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            key: "document.path".to_string(),
            message: "must not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for document.path: must not be empty"
        );

        let errs = ValidationErrors(vec![
            ConfigError::InvalidValue {
                key: "view.mode".into(),
                message: "unknown view mode: grid".into(),
            },
            ConfigError::InvalidValue {
                key: "kanban.max_cards".into(),
                message: "must be greater than zero".into(),
            },
        ]);
        assert_eq!(
            errs.to_string(),
            "Validation failed: Invalid value for view.mode: unknown view mode: grid; \
             Invalid value for kanban.max_cards: must be greater than zero"
        );
    }

    #[test]
    fn test_builder_order() {
        let config = ConfigBuilder::new()
            .memory(MemoryConfigProvider::named("overrides"))
            .env()
            .file("catalog.json")
            .build();
        assert_eq!(config.provider_names(), vec!["overrides", "env", "file"]);
    }
}
