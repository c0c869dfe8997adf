//! Catalog model and parser.
//!
//! A catalog document is markdown where `## ` headings name categories and
//! list items with a leading link name tools:
//!
//! ```rust
//! use catalog_explorer::catalog;
//!
//! let catalog = catalog::parse(
//!     "## Aligners\n- [ToolA](http://a.example) - Fast aligner for short reads\n",
//! );
//! assert_eq!(catalog.records()[0].description(), "Fast aligner for short reads");
//! ```

mod index;
mod parser;
mod record;

pub use index::CategoryIndex;
pub use parser::{clean_description, parse, parse_entry};
pub use record::ToolRecord;

/// Category assigned to entries that appear before any heading.
pub const DEFAULT_CATEGORY: &str = "General";

/// Navigational sections that never contribute entries.
pub const EXCLUDED_SECTIONS: [&str; 2] = ["Table of content", "How to View This README"];

/// Maximum description length in characters, before the ellipsis.
pub const MAX_DESCRIPTION_CHARS: usize = 300;

pub const ELLIPSIS: &str = "...";

pub(crate) const HEADING_PREFIX: &str = "## ";
pub(crate) const DETAILS_MARKER: &str = "<details>";

/// Parsed catalog: records in document order plus their category grouping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<ToolRecord>,
    categories: CategoryIndex,
}

impl Catalog {
    /// Catalog with no records, used when the document is unavailable.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a document; see [`parse`].
    pub fn parse(document: &str) -> Self {
        parse(document)
    }

    pub(crate) fn from_parts(records: Vec<ToolRecord>, categories: CategoryIndex) -> Self {
        Self {
            records,
            categories,
        }
    }

    pub fn records(&self) -> &[ToolRecord] {
        &self.records
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
