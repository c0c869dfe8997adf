//! Display-ready projections of a selection.
//!
//! Nothing here renders. Each [`ViewMode`] maps a [`Selection`] to plain data
//! (cards, table rows or kanban columns) that a front end can draw however it
//! likes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::ToolRecord;
use crate::query::{CategoryFilter, Selection};
use crate::{Error, Result};

/// Column headers of the table view, in column order.
pub const TABLE_HEADERS: [&str; 4] = ["Tool Name", "Category", "Description", "Link"];

/// How the front end lays out the current selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
    Kanban,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Cards, ViewMode::Table, ViewMode::Kanban];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cards => "cards",
            Self::Table => "table",
            Self::Kanban => "kanban",
        }
    }

    /// Label shown in a mode picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cards => "Cards",
            Self::Table => "Table",
            Self::Kanban => "Kanban Board",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cards" | "card" | "list" => Ok(Self::Cards),
            "table" => Ok(Self::Table),
            "kanban" | "kanban board" | "board" => Ok(Self::Kanban),
            other => Err(Error::Config(format!("unknown view mode: {}", other))),
        }
    }
}

/// One record drawn as a card with a category badge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub description: &'a str,
    pub url: &'a str,
}

impl<'a> From<&'a ToolRecord> for Card<'a> {
    fn from(record: &'a ToolRecord) -> Self {
        Self {
            name: record.name(),
            category: record.category(),
            description: record.description(),
            url: record.url(),
        }
    }
}

/// One table row; field order matches [`TABLE_HEADERS`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableRow<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub description: &'a str,
    pub url: &'a str,
}

impl<'a> TableRow<'a> {
    pub fn cells(&self) -> [&'a str; 4] {
        [self.name, self.category, self.description, self.url]
    }
}

impl<'a> From<&'a ToolRecord> for TableRow<'a> {
    fn from(record: &'a ToolRecord) -> Self {
        Self {
            name: record.name(),
            category: record.category(),
            description: record.description(),
            url: record.url(),
        }
    }
}

/// Caps applied to the kanban board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanLimits {
    pub max_columns: usize,
    pub max_cards: usize,
    /// Characters of description kept on each card.
    pub excerpt_chars: usize,
}

impl Default for KanbanLimits {
    fn default() -> Self {
        Self {
            max_columns: 6,
            max_cards: 10,
            excerpt_chars: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KanbanCard<'a> {
    pub name: &'a str,
    pub excerpt: String,
    pub url: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KanbanColumn<'a> {
    pub category: &'a str,
    pub cards: Vec<KanbanCard<'a>>,
    /// Records of this category in the selection, before the card cap.
    pub total: usize,
}

impl KanbanColumn<'_> {
    pub fn is_truncated(&self) -> bool {
        self.cards.len() < self.total
    }
}

/// Selection grouped into per-category columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct KanbanBoard<'a> {
    pub columns: Vec<KanbanColumn<'a>>,
}

impl<'a> KanbanBoard<'a> {
    /// Group `selection` into columns.
    ///
    /// With [`CategoryFilter::All`] the columns are the selection's
    /// categories in first-appearance order, capped at `max_columns`. A
    /// named category always yields exactly that one column.
    pub fn build(
        selection: &Selection<'a>,
        category: &'a CategoryFilter,
        limits: KanbanLimits,
    ) -> Self {
        let categories: Vec<&'a str> = match category {
            CategoryFilter::All => {
                let mut seen: Vec<&'a str> = Vec::new();
                for record in selection.iter() {
                    if seen.len() == limits.max_columns {
                        break;
                    }
                    if !seen.contains(&record.category()) {
                        seen.push(record.category());
                    }
                }
                seen
            }
            CategoryFilter::Named(name) => vec![name.as_str()],
        };

        let columns = categories
            .into_iter()
            .map(|name| {
                let in_column: Vec<&'a ToolRecord> =
                    selection.iter().filter(|r| r.category() == name).collect();
                KanbanColumn {
                    category: name,
                    total: in_column.len(),
                    cards: in_column
                        .into_iter()
                        .take(limits.max_cards)
                        .map(|r| KanbanCard {
                            name: r.name(),
                            excerpt: excerpt(r.description(), limits.excerpt_chars),
                            url: r.url(),
                        })
                        .collect(),
                }
            })
            .collect();

        Self { columns }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn excerpt(description: &str, chars: usize) -> String {
    let cut = description
        .char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(description.len());
    format!("{}...", &description[..cut])
}

/// A selection laid out for one [`ViewMode`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "items", rename_all = "lowercase")]
pub enum Layout<'a> {
    Cards(Vec<Card<'a>>),
    Table(Vec<TableRow<'a>>),
    Kanban(KanbanBoard<'a>),
}

impl<'a> Layout<'a> {
    pub fn build(
        mode: ViewMode,
        selection: &Selection<'a>,
        category: &'a CategoryFilter,
        limits: KanbanLimits,
    ) -> Self {
        match mode {
            ViewMode::Cards => Self::Cards(selection.iter().map(Card::from).collect()),
            ViewMode::Table => Self::Table(selection.iter().map(TableRow::from).collect()),
            ViewMode::Kanban => Self::Kanban(KanbanBoard::build(selection, category, limits)),
        }
    }

    pub fn mode(&self) -> ViewMode {
        match self {
            Self::Cards(_) => ViewMode::Cards,
            Self::Table(_) => ViewMode::Table,
            Self::Kanban(_) => ViewMode::Kanban,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::query::Query;

    fn catalog_with(categories: usize, per_category: usize) -> Catalog {
        let mut doc = String::new();
        for c in 0..categories {
            doc.push_str(&format!("## Category {}\n", c));
            for t in 0..per_category {
                doc.push_str(&format!(
                    "- [Tool {c}-{t}](http://t{c}-{t}.example) - Tool number {t}\n"
                ));
            }
        }
        Catalog::parse(&doc)
    }

    #[test]
    fn test_view_mode_parsing() {
        assert_eq!("cards".parse::<ViewMode>().unwrap(), ViewMode::Cards);
        assert_eq!("Table".parse::<ViewMode>().unwrap(), ViewMode::Table);
        assert_eq!("Kanban Board".parse::<ViewMode>().unwrap(), ViewMode::Kanban);
        assert!("grid".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::default(), ViewMode::Cards);
        assert_eq!(serde_json::to_string(&ViewMode::Kanban).unwrap(), "\"kanban\"");
    }

    #[test]
    fn test_table_rows_follow_header_order() {
        let catalog = catalog_with(1, 1);
        let selection = Query::new().apply(catalog.records());
        let all = CategoryFilter::All;

        let Layout::Table(rows) =
            Layout::build(ViewMode::Table, &selection, &all, KanbanLimits::default())
        else {
            panic!("expected table layout");
        };
        assert_eq!(
            rows[0].cells(),
            ["Tool 0-0", "Category 0", "Tool number 0", "http://t0-0.example"]
        );
        assert_eq!(TABLE_HEADERS.len(), rows[0].cells().len());
    }

    #[test]
    fn test_kanban_caps_columns_and_cards() {
        let catalog = catalog_with(8, 12);
        let selection = Query::new().apply(catalog.records());
        let all = CategoryFilter::All;

        let board = KanbanBoard::build(&selection, &all, KanbanLimits::default());
        assert_eq!(board.columns.len(), 6);
        assert_eq!(board.columns[0].category, "Category 0");
        assert_eq!(board.columns[5].category, "Category 5");
        assert!(board.columns.iter().all(|c| c.cards.len() == 10));
        assert!(board.columns.iter().all(|c| c.total == 12 && c.is_truncated()));
    }

    #[test]
    fn test_kanban_named_category_single_column() {
        let catalog = catalog_with(3, 2);
        let category = CategoryFilter::named("Category 1");
        let selection = Query::new()
            .category(category.clone())
            .apply(catalog.records());

        let board = KanbanBoard::build(&selection, &category, KanbanLimits::default());
        assert_eq!(board.columns.len(), 1);
        assert_eq!(board.columns[0].category, "Category 1");
        assert_eq!(board.columns[0].cards.len(), 2);
    }

    #[test]
    fn test_kanban_excerpt() {
        assert_eq!(excerpt("short", 100), "short...");
        assert_eq!(excerpt("abcdef", 3), "abc...");
        assert_eq!(excerpt("ééé", 2), "éé...");
    }

    #[test]
    fn test_cards_preserve_selection_order() {
        let catalog = catalog_with(2, 2);
        let selection = Query::new().apply(catalog.records());
        let all = CategoryFilter::All;

        let layout = Layout::build(ViewMode::Cards, &selection, &all, KanbanLimits::default());
        assert_eq!(layout.mode(), ViewMode::Cards);
        let Layout::Cards(cards) = layout else {
            panic!("expected cards layout");
        };
        let names: Vec<&str> = cards.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Tool 0-0", "Tool 0-1", "Tool 1-0", "Tool 1-1"]);
    }
}
