//! Generic list rendering and pagination.

use serde_json::Value;

use crate::document::{display_value, get_nested_value, Document};
use crate::resource::{ColumnConfig, ResourceConfig};

/// Page-size choices offered by the footer.
pub const LIMIT_CHOICES: [usize; 3] = [10, 25, 50];

/// Pagination cursor for a list page.
///
/// `has_next` is judged from the size of the last fetched page rather
/// than `total`, matching the behavior when the backend answers with a
/// bare array and no count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: usize,
    pub skip: usize,
    pub total: usize,
}

impl Pagination {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            skip: 0,
            total: 0,
        }
    }

    /// 1-based page number.
    #[must_use]
    pub fn page(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            self.skip.checked_div(self.limit).unwrap_or(0).saturating_add(1)
        }
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.skip > 0
    }

    /// Whether a next page is worth requesting given the last fetch size.
    #[must_use]
    pub fn has_next(&self, fetched: usize) -> bool {
        fetched >= self.limit && self.limit > 0
    }

    /// Advance one page. Returns false (unchanged) when the last fetch
    /// came back short.
    pub fn next(&mut self, fetched: usize) -> bool {
        if !self.has_next(fetched) {
            return false;
        }
        self.skip = self.skip.saturating_add(self.limit);
        true
    }

    /// Step back one page, clamping at the start.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.skip = self.skip.saturating_sub(self.limit);
        true
    }

    /// Change the page size and restart from the first page.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.skip = 0;
    }
}

fn column_text(column: &ColumnConfig, serialized: &Value, item: &Document) -> String {
    let raw = get_nested_value(serialized, column.key);
    match column.formatter {
        Some(format) => format(raw, item),
        None => display_value(raw),
    }
}

/// Render a list of documents using the config's columns.
///
/// The first column is the row heading; the rest render as
/// `Label: value` lines. `quick_filter` selects one of the config's
/// client-side filters by id (an unknown id filters nothing).
#[must_use]
pub fn render_list(
    config: &ResourceConfig,
    items: &[Document],
    quick_filter: Option<&str>,
    pagination: Option<&Pagination>,
) -> String {
    let filter = quick_filter.and_then(|id| config.quick_filter(id));
    let visible: Vec<&Document> = items
        .iter()
        .filter(|item| filter.is_none_or(|f| (f.filter)(item)))
        .collect();

    let mut out = format!("== {} ==\n", config.labels.plural);

    if visible.is_empty() {
        out.push_str(&format!(
            "No {} found.\n",
            config.labels.singular.to_lowercase()
        ));
    }

    for item in &visible {
        let Ok(serialized) = serde_json::to_value(item) else {
            continue;
        };
        let mut columns = config.columns.iter();
        if let Some(first) = columns.next() {
            out.push_str(&format!("* {}\n", column_text(first, &serialized, item)));
        }
        for column in columns {
            out.push_str(&format!(
                "    {}: {}\n",
                column.label,
                column_text(column, &serialized, item)
            ));
        }
    }

    if let Some(p) = pagination {
        let prev = if p.has_previous() { "<prev" } else { "     " };
        let next = if p.has_next(visible.len()) { "next>" } else { "     " };
        out.push_str(&format!(
            "{prev} page {} ({} per page) {next}\n",
            p.page(),
            p.limit
        ));
    }

    out
}

/// Loading placeholder for a list page.
#[must_use]
pub fn render_loading(config: &ResourceConfig) -> String {
    format!("Loading {}...\n", config.labels.plural.to_lowercase())
}

/// Error display with the retry affordance.
#[must_use]
pub fn render_error(message: &str) -> String {
    format!("Error: {message}\n(run the same command again to retry)\n")
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
