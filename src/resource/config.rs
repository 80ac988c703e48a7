//! Declarative per-type resource configuration.
//!
//! A [`ResourceConfig`] is built once per document type at startup and
//! never mutated; every page for that type shares the same instance.
//! Formatters and quick filters are plain function pointers so configs
//! stay pure data.

use serde_json::Value;

use crate::document::{Document, DocumentType};

/// Pure display formatter: raw column value (if any) plus the whole item.
pub type Formatter = fn(Option<&Value>, &Document) -> String;

/// Display labels for a resource.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub singular: &'static str,
    pub plural: &'static str,
}

/// One column of the list view.
///
/// `key` is a dotted path into the serialized document
/// (e.g. `data.platform`).
#[derive(Debug, Clone, Copy)]
pub struct ColumnConfig {
    pub key: &'static str,
    pub label: &'static str,
    pub formatter: Option<Formatter>,
}

impl ColumnConfig {
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            formatter: None,
        }
    }

    #[must_use]
    pub const fn with_formatter(key: &'static str, label: &'static str, f: Formatter) -> Self {
        Self {
            key,
            label,
            formatter: Some(f),
        }
    }
}

/// Client-side list filter, a pure predicate over one item.
#[derive(Debug, Clone, Copy)]
pub struct QuickFilter {
    pub id: &'static str,
    pub label: &'static str,
    pub filter: fn(&Document) -> bool,
}

/// Complete configuration of one resource for the generic engine.
#[derive(Debug, Clone)]
pub struct ResourceConfig {
    /// Discriminator sent as the `type` filter and forced into payloads.
    pub resource_type: DocumentType,
    pub labels: Labels,
    /// Columns of the list view, first column acts as the row heading.
    pub columns: Vec<ColumnConfig>,
    pub quick_filters: Vec<QuickFilter>,
    /// Fields the detail view must not let the user edit.
    pub read_only_fields: &'static [&'static str],
}

impl ResourceConfig {
    /// Find a quick filter by id.
    #[must_use]
    pub fn quick_filter(&self, id: &str) -> Option<&QuickFilter> {
        self.quick_filters.iter().find(|f| f.id == id)
    }

    /// Whether a field is editable in the detail view.
    #[must_use]
    pub fn is_read_only(&self, field: &str) -> bool {
        self.read_only_fields.contains(&field)
    }
}
