//! Load-and-query facade consumed by front ends.
//!
//! `Explorer` owns the document source and the parse cache. Loading never
//! aborts: an unreadable document leaves an empty catalog behind and is
//! reported through [`LoadStatus::Unavailable`] and
//! [`ViewState::DocumentUnavailable`].

use std::sync::Arc;

use tracing::Instrument;

use crate::Result;
use crate::cache::{CacheLookup, CatalogCache};
use crate::catalog::Catalog;
use crate::config::ExplorerSettings;
use crate::query::{ALL_CATEGORIES, CategoryFilter, Query, Selection, Summary};
use crate::source::DocumentSource;
use crate::view::{KanbanLimits, Layout, ViewMode};

/// Outcome of the most recent load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    /// Document changed (or first load); it was parsed.
    Parsed,
    /// Document unchanged; the cached parse was reused.
    Cached,
    Unavailable { reason: String },
}

impl LoadStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Parsed | Self::Cached)
    }
}

/// What the front end should show for a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing has been loaded yet.
    NotLoaded,
    Results,
    /// The catalog has records but none pass the filters.
    NoMatch,
    /// The document was read but lists no entries.
    EmptyCatalog,
    /// The document could not be read.
    DocumentUnavailable { reason: String },
}

pub struct Explorer {
    source: DocumentSource,
    cache: CatalogCache,
    kanban: KanbanLimits,
    catalog: Arc<Catalog>,
    status: LoadStatus,
}

impl Explorer {
    pub fn new(source: DocumentSource) -> Self {
        Self {
            source,
            cache: CatalogCache::new(),
            kanban: KanbanLimits::default(),
            catalog: Arc::new(Catalog::empty()),
            status: LoadStatus::NotLoaded,
        }
    }

    pub fn from_settings(settings: &ExplorerSettings) -> Self {
        let cache = if settings.cache_enabled {
            CatalogCache::new()
        } else {
            CatalogCache::disabled()
        };
        Self::new(settings.document.clone())
            .with_cache(cache)
            .kanban_limits(settings.kanban)
    }

    pub fn with_cache(mut self, cache: CatalogCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn kanban_limits(mut self, limits: KanbanLimits) -> Self {
        self.kanban = limits;
        self
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// Read the document and refresh the catalog, propagating read errors.
    ///
    /// On error the previously loaded catalog is left untouched.
    pub async fn try_load(&mut self) -> Result<Arc<Catalog>> {
        let span = tracing::info_span!("catalog.load", source = %self.source);
        async {
            let document = self.source.load().await?;
            let (catalog, lookup) = self.cache.get_or_parse(&document);
            self.status = match lookup {
                CacheLookup::Hit => LoadStatus::Cached,
                CacheLookup::Miss => LoadStatus::Parsed,
            };
            self.catalog = Arc::clone(&catalog);
            tracing::debug!(
                records = catalog.len(),
                categories = catalog.categories().len(),
                status = ?self.status,
                "catalog ready"
            );
            Ok::<_, crate::Error>(catalog)
        }
        .instrument(span)
        .await
    }

    /// Read the document and refresh the catalog.
    ///
    /// Read failures leave an empty catalog and an
    /// [`LoadStatus::Unavailable`] status instead of an error.
    pub async fn load(&mut self) -> &LoadStatus {
        if let Err(e) = self.try_load().await {
            tracing::warn!(source = %self.source, error = %e, "catalog document unavailable");
            self.catalog = Arc::new(Catalog::empty());
            self.status = LoadStatus::Unavailable {
                reason: e.to_string(),
            };
        }
        &self.status
    }

    /// Category choices for a selector: `"All"` then the sorted categories.
    pub fn category_choices(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES)
            .chain(self.catalog.categories().sorted_names())
            .map(str::to_string)
            .collect()
    }

    /// Run `query` against the loaded catalog.
    pub fn query<'a>(&'a self, query: &'a Query) -> ExplorerView<'a> {
        let selection = query.apply(self.catalog.records());
        let summary = Summary::compute(&self.catalog, query.category_filter());

        let state = match &self.status {
            LoadStatus::NotLoaded => ViewState::NotLoaded,
            LoadStatus::Unavailable { reason } => ViewState::DocumentUnavailable {
                reason: reason.clone(),
            },
            _ if self.catalog.is_empty() => ViewState::EmptyCatalog,
            _ if selection.is_empty() => ViewState::NoMatch,
            _ => ViewState::Results,
        };

        ExplorerView {
            selection,
            summary,
            state,
            category: query.category_filter(),
            kanban: self.kanban,
        }
    }
}

/// Filtered records, summary counts and display state for one query.
#[derive(Clone, Debug)]
pub struct ExplorerView<'a> {
    selection: Selection<'a>,
    summary: Summary,
    state: ViewState,
    category: &'a CategoryFilter,
    kanban: KanbanLimits,
}

impl<'a> ExplorerView<'a> {
    pub fn selection(&self) -> &Selection<'a> {
        &self.selection
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn has_results(&self) -> bool {
        self.state == ViewState::Results
    }

    /// Lay the selection out for `mode`.
    pub fn layout(&self, mode: ViewMode) -> Layout<'a> {
        Layout::build(mode, &self.selection, self.category, self.kanban)
    }
}
