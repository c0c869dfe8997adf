//! # catalog-explorer
//!
//! Parse markdown tool catalogs (an "awesome list" style `README.md` where
//! `## ` headings name categories and list items link to tools) into
//! structured records, then search and filter them for card, table and
//! kanban front ends.
//!
//! ## Quick Start
//!
//! ```rust
//! use catalog_explorer::{Catalog, query};
//!
//! let catalog = Catalog::parse(
//!     "## Aligners\n\
//!      - [ToolA](http://a.example) - Fast aligner for short reads\n\
//!      - [ToolB](http://b.example) Handles long reads too\n",
//! );
//! let hits = query::filter(catalog.records(), "long", "All");
//! assert_eq!(hits[0].name(), "ToolB");
//! ```
//!
//! ## Loading From Disk
//!
//! ```rust,no_run
//! use catalog_explorer::{DocumentSource, Explorer, Query, ViewMode};
//!
//! # async fn example() {
//! let mut explorer = Explorer::new(DocumentSource::file("README.md"));
//! explorer.load().await;
//!
//! let query = Query::new().text("hi-c").category("Aligners");
//! let view = explorer.query(&query);
//! println!("{} of {} tools", view.selection().len(), view.summary().total);
//! let layout = view.layout(ViewMode::Kanban);
//! # let _ = layout;
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod cache;
pub mod catalog;
pub mod config;
pub mod explorer;
pub mod prelude;
pub mod query;
pub mod source;
pub mod view;

pub use cache::{CacheLookup, CacheStats, CatalogCache};
pub use catalog::{Catalog, CategoryIndex, DEFAULT_CATEGORY, ToolRecord};
pub use config::{ConfigBuilder, ConfigError, ExplorerSettings};
pub use explorer::{Explorer, ExplorerView, LoadStatus, ViewState};
pub use query::{ALL_CATEGORIES, CategoryFilter, Query, Selection, Summary};
pub use source::{DocumentSource, Fingerprint, LoadedDocument};
pub use view::{KanbanBoard, KanbanLimits, Layout, ViewMode};

/// Error type for catalog-explorer operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The catalog document could not be read.
    #[error("Document unavailable ({location}): {reason}")]
    DocumentUnavailable { location: String, reason: String },

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used by front ends to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The catalog source is broken or unreachable
    DataSource,
    /// Settings are invalid
    Configuration,
    /// Unexpected IO or serialization failures
    Internal,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::DocumentUnavailable { .. } => ErrorCategory::DataSource,
            Error::Config(_) => ErrorCategory::Configuration,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Internal,
        }
    }

    pub fn is_document_unavailable(&self) -> bool {
        matches!(self, Error::DocumentUnavailable { .. })
    }

    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::Serialization(e) => Error::Json(e),
            config::ConfigError::Io(e) => Error::Io(e),
            other => Error::Config(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Load settings from `CATALOG_*` environment variables and an optional
/// JSON settings file, then load the catalog they point at.
pub async fn open(settings_file: Option<&std::path::Path>) -> Result<Explorer> {
    let mut builder = ConfigBuilder::new().env();
    if let Some(path) = settings_file {
        builder = builder.file(path);
    }
    let settings = ExplorerSettings::load(&builder.build()).await?;
    let mut explorer = Explorer::from_settings(&settings);
    explorer.load().await;
    Ok(explorer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DocumentUnavailable {
            location: "README.md".to_string(),
            reason: "No such file or directory".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Document unavailable (README.md): No such file or directory"
        );
        assert_eq!(err.category(), ErrorCategory::DataSource);
    }

    #[tokio::test]
    async fn test_transport_failure_is_document_unavailable() {
        let err = DocumentSource::http("http://127.0.0.1:1/README.md")
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DocumentUnavailable { .. }));
        assert_eq!(err.category(), ErrorCategory::DataSource);
    }

    #[test]
    fn test_config_error_conversion() {
        let err: Error = config::ConfigError::InvalidValue {
            key: "view.mode".to_string(),
            message: "unknown view mode: grid".to_string(),
        }
        .into();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("view.mode"));

        let io = std::io::Error::other("disk");
        let err: Error = config::ConfigError::Io(io).into();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[tokio::test]
    async fn test_open_with_settings_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let catalog_path = temp_dir.path().join("TOOLS.md");
        tokio::fs::write(&catalog_path, "## Viewers\n- [HiGlass](http://h.example) - Viewer\n")
            .await
            .unwrap();

        let settings_path = temp_dir.path().join("catalog.json");
        let settings = serde_json::json!({
            "document": { "path": catalog_path.to_string_lossy() },
            "view": { "mode": "table" }
        });
        tokio::fs::write(&settings_path, settings.to_string())
            .await
            .unwrap();

        let explorer = open(Some(&settings_path)).await.unwrap();
        assert_eq!(explorer.status(), &LoadStatus::Parsed);
        assert_eq!(explorer.catalog().records()[0].name(), "HiGlass");
    }
}
