//! Line-oriented scanner turning a catalog document into records.
//!
//! The document is split at `## ` headings. Each heading names the category
//! for the entries below it, and every line of the form
//! `- <a name="id">[Name](url) - description` becomes a [`ToolRecord`].

use std::sync::OnceLock;

use regex::Regex;

use super::{
    Catalog, CategoryIndex, DEFAULT_CATEGORY, DETAILS_MARKER, ELLIPSIS, EXCLUDED_SECTIONS,
    HEADING_PREFIX, MAX_DESCRIPTION_CHARS, ToolRecord,
};

fn entry_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^-\s*(?:<a name="([^"]+)">)?\[([^\]]+)\]\(([^)]+)\)"#)
            .expect("valid catalog entry regex")
    })
}

/// Parse a catalog document.
///
/// Never fails: a document without entries yields an empty [`Catalog`].
pub fn parse(document: &str) -> Catalog {
    let mut records = Vec::new();
    let mut index = CategoryIndex::new();
    let mut category = DEFAULT_CATEGORY.to_string();
    let mut skipping = is_excluded(&category);

    for line in document.lines() {
        if let Some(heading) = line.strip_prefix(HEADING_PREFIX) {
            // An empty heading keeps the previous category.
            if let Some(name) = heading_name(heading) {
                category = name.to_string();
            }
            skipping = is_excluded(&category);
            if skipping {
                tracing::trace!(section = %category, "skipping navigational section");
            }
            continue;
        }

        if skipping {
            continue;
        }

        if let Some(record) = parse_entry(line, &category) {
            index.insert(record.clone());
            records.push(record);
        }
    }

    tracing::debug!(
        records = records.len(),
        categories = index.len(),
        "parsed catalog document"
    );

    Catalog::from_parts(records, index)
}

/// Parse a single entry line under `category`.
///
/// Returns `None` for lines that do not match the entry pattern.
pub fn parse_entry(line: &str, category: &str) -> Option<ToolRecord> {
    let caps = entry_regex().captures(line)?;
    let link_end = caps.get(0)?.end();

    let id = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let name = caps.get(2)?.as_str();
    let url = caps.get(3)?.as_str();
    let description = clean_description(&line[link_end..]);

    ToolRecord::new(name, url, category, description).map(|record| record.with_id(id))
}

/// Normalize the text that follows an entry's link.
///
/// Strips the conventional `- ` separator, drops any `<details>` block and
/// caps the result at [`MAX_DESCRIPTION_CHARS`] characters plus an ellipsis.
pub fn clean_description(raw: &str) -> String {
    let mut description = raw.trim();
    if let Some(rest) = description.strip_prefix("- ") {
        description = rest.trim();
    }
    if let Some(pos) = description.find(DETAILS_MARKER) {
        description = &description[..pos];
    }
    truncate(description)
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_DESCRIPTION_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

fn heading_name(heading: &str) -> Option<&str> {
    let name = heading.split('#').next().unwrap_or_default().trim();
    (!name.is_empty()).then_some(name)
}

fn is_excluded(category: &str) -> bool {
    EXCLUDED_SECTIONS.contains(&category)
}
