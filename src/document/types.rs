//! Wire-level document types shared by every resource.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::date::MongoDate;

/// Document type discriminator for API filtering and serialization.
///
/// The wire value for needs is `besoin` (the service predates the English
/// naming); [`std::str::FromStr`] accepts `need` as an input alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Post,
    Prompt,
    Model,
    Besoin,
    Application,
}

impl DocumentType {
    /// All document types known to the service.
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Post,
        DocumentType::Prompt,
        DocumentType::Model,
        DocumentType::Besoin,
        DocumentType::Application,
    ];

    /// The exact string sent as the `type` filter value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Post => "post",
            DocumentType::Prompt => "prompt",
            DocumentType::Model => "model",
            DocumentType::Besoin => "besoin",
            DocumentType::Application => "application",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "post" => Ok(DocumentType::Post),
            "prompt" => Ok(DocumentType::Prompt),
            "model" => Ok(DocumentType::Model),
            "besoin" | "need" => Ok(DocumentType::Besoin),
            "application" => Ok(DocumentType::Application),
            _ => Err(format!("Unknown document type: {s}")),
        }
    }
}

/// A labelled link attached to a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DocumentLink {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// A knowledge-base document as returned by the REST API.
///
/// `data` is the type-specific payload; the typed views in
/// [`crate::document::data`] decode it on demand. `id` is server-assigned
/// and immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub theme: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<DocumentLink>,
    pub created_at: MongoDate,
    pub updated_at: MongoDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<MongoDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<String>,
}

impl Document {
    /// The document's title, or an empty string when absent.
    #[must_use]
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// Partial document body for create/update requests.
///
/// Mirrors a JSON object with only the fields being written; absent keys
/// are left untouched by the server.
pub type PartialDocument = Map<String, Value>;

/// Paged list response shape (`{items, total, limit, skip}`).
///
/// Every field is optional on the wire; the API may also answer with a
/// bare array, and the resource engine normalizes both shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentListResponse {
    #[serde(default)]
    pub items: Vec<Document>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub skip: Option<usize>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
