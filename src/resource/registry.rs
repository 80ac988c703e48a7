//! Static registry of the five resource configurations.
//!
//! Configs are process-wide constants built on first use; the registry is
//! the only place column layouts and quick filters are defined.

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::document::{
    display_value, format_mongo_date, get_nested_value, Document, DocumentType, NeedStatus,
    DATE_FALLBACK,
};

use super::config::{ColumnConfig, Labels, QuickFilter, ResourceConfig};

fn fmt_date(value: Option<&Value>, _item: &Document) -> String {
    value.map_or_else(
        || DATE_FALLBACK.to_string(),
        |v| format_mongo_date(v, DATE_FALLBACK),
    )
}

fn fmt_date_unknown(value: Option<&Value>, _item: &Document) -> String {
    value.map_or_else(
        || "unknown date".to_string(),
        |v| format_mongo_date(v, "unknown date"),
    )
}

fn fmt_upper(value: Option<&Value>, _item: &Document) -> String {
    match value.and_then(Value::as_str) {
        Some(s) => s.to_uppercase(),
        None => String::new(),
    }
}

fn fmt_upper_or_na(value: Option<&Value>, _item: &Document) -> String {
    match value.and_then(Value::as_str) {
        Some(s) => s.to_uppercase(),
        None => "N/A".to_string(),
    }
}

fn fmt_or_not_set(value: Option<&Value>, _item: &Document) -> String {
    let text = display_value(value);
    if text.is_empty() {
        DATE_FALLBACK.to_string()
    } else {
        text
    }
}

fn fmt_or_dash(value: Option<&Value>, _item: &Document) -> String {
    let text = display_value(value);
    if text.is_empty() {
        "-".to_string()
    } else {
        text
    }
}

fn need_status_is(item: &Document, status: NeedStatus) -> bool {
    let Ok(value) = serde_json::to_value(item) else {
        return false;
    };
    get_nested_value(&value, "data.status")
        .and_then(Value::as_str)
        .is_some_and(|s| s == status.as_str())
}

static POSTS: Lazy<ResourceConfig> = Lazy::new(|| ResourceConfig {
    resource_type: DocumentType::Post,
    labels: Labels {
        singular: "Post",
        plural: "Posts",
    },
    columns: vec![
        ColumnConfig::new("title", "Title"),
        ColumnConfig::with_formatter("data.platform", "Platform", fmt_or_not_set),
        ColumnConfig::with_formatter("data.published_date", "Published", fmt_date),
    ],
    quick_filters: vec![],
    read_only_fields: &["title"],
});

static PROMPTS: Lazy<ResourceConfig> = Lazy::new(|| ResourceConfig {
    resource_type: DocumentType::Prompt,
    labels: Labels {
        singular: "Prompt",
        plural: "Prompts",
    },
    columns: vec![
        ColumnConfig::new("title", "Title"),
        ColumnConfig::with_formatter("updated_at", "Last updated", fmt_date),
    ],
    quick_filters: vec![],
    read_only_fields: &["title"],
});

static MODELS: Lazy<ResourceConfig> = Lazy::new(|| ResourceConfig {
    resource_type: DocumentType::Model,
    labels: Labels {
        singular: "Model",
        plural: "Models",
    },
    columns: vec![
        ColumnConfig::new("title", "Title"),
        ColumnConfig::with_formatter("created_at", "Created", fmt_date),
    ],
    quick_filters: vec![],
    read_only_fields: &[],
});

static NEEDS: Lazy<ResourceConfig> = Lazy::new(|| ResourceConfig {
    resource_type: DocumentType::Besoin,
    labels: Labels {
        singular: "Need",
        plural: "Needs",
    },
    columns: vec![
        ColumnConfig::new("title", "Title"),
        ColumnConfig::with_formatter("data.status", "Status", fmt_upper),
        ColumnConfig::new("data.iteration", "Iteration"),
        ColumnConfig::with_formatter("updated_at", "Last updated", fmt_date),
    ],
    quick_filters: vec![
        QuickFilter {
            id: "analyse",
            label: "In analysis",
            filter: |item| need_status_is(item, NeedStatus::Analyse),
        },
        QuickFilter {
            id: "validation",
            label: "In validation",
            filter: |item| need_status_is(item, NeedStatus::Validation),
        },
        QuickFilter {
            id: "detail",
            label: "In detail",
            filter: |item| need_status_is(item, NeedStatus::Detail),
        },
        QuickFilter {
            id: "specification",
            label: "Specified",
            filter: |item| need_status_is(item, NeedStatus::Specification),
        },
    ],
    read_only_fields: &["id", "created_at", "updated_at", "type"],
});

static APPLICATIONS: Lazy<ResourceConfig> = Lazy::new(|| ResourceConfig {
    resource_type: DocumentType::Application,
    labels: Labels {
        singular: "Application",
        plural: "Applications",
    },
    columns: vec![
        ColumnConfig::new("title", "Title"),
        ColumnConfig::with_formatter("data.status", "Status", fmt_upper_or_na),
        ColumnConfig::with_formatter("data.url", "URL", fmt_or_dash),
        ColumnConfig::with_formatter("created_at", "Created", fmt_date_unknown),
    ],
    quick_filters: vec![],
    read_only_fields: &["title"],
});

/// The process-wide configuration for a document type.
#[must_use]
pub fn config_for(doc_type: DocumentType) -> &'static ResourceConfig {
    match doc_type {
        DocumentType::Post => &POSTS,
        DocumentType::Prompt => &PROMPTS,
        DocumentType::Model => &MODELS,
        DocumentType::Besoin => &NEEDS,
        DocumentType::Application => &APPLICATIONS,
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
