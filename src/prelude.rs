//! Prelude module for convenient imports.
//!
//! ```rust
//! use catalog_explorer::prelude::*;
//! ```

pub use crate::Error;
pub use crate::Result;

// Catalog
pub use crate::catalog::{Catalog, CategoryIndex, ToolRecord};

// Querying
pub use crate::query::{CategoryFilter, Query, Selection, Summary, filter};

// Loading
pub use crate::cache::CatalogCache;
pub use crate::explorer::{Explorer, ExplorerView, LoadStatus, ViewState};
pub use crate::source::DocumentSource;

// Views
pub use crate::view::{KanbanLimits, Layout, ViewMode};

// Configuration
pub use crate::config::{ConfigBuilder, ConfigProvider, ConfigProviderExt, ExplorerSettings};
