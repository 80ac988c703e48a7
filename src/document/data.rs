//! Typed views over the polymorphic `Document::data` payload.
//!
//! Each view decodes from the raw JSON map and encodes back into it.
//! Unknown keys are preserved through the `extra` flatten so a decode →
//! mutate → encode cycle never drops fields the console does not model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::Document;

/// Decode a typed payload view from a document's `data` map.
///
/// # Errors
///
/// Returns the underlying serde error when the payload does not match the
/// expected shape for the type.
pub fn decode_data<T: serde::de::DeserializeOwned>(doc: &Document) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(doc.data.clone()))
}

/// Encode a typed payload view back into a `data` map.
///
/// # Errors
///
/// Returns the underlying serde error when the view does not serialize to
/// a JSON object.
pub fn encode_data<T: Serialize>(data: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(data)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "payload serialized to non-object JSON: {other}"
        ))),
    }
}

/// Engagement counters attached to a published post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
}

/// Payload of a `post` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostData {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub published_date: Option<super::date::MongoDate>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement: Option<Engagement>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of a `prompt` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptData {
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of a `model` document: an arbitrary JSON structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelData {
    #[serde(default)]
    pub content: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lifecycle status of a need in the validation workflow.
///
/// The four stages form a strict forward order; the reject branch returns
/// to [`NeedStatus::Analyse`] from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeedStatus {
    Analyse,
    Validation,
    Detail,
    Specification,
}

impl NeedStatus {
    /// The next stage when accepting, `None` at the terminal stage.
    #[must_use]
    pub fn next(self) -> Option<NeedStatus> {
        match self {
            NeedStatus::Analyse => Some(NeedStatus::Validation),
            NeedStatus::Validation => Some(NeedStatus::Detail),
            NeedStatus::Detail => Some(NeedStatus::Specification),
            NeedStatus::Specification => None,
        }
    }

    /// Whether the workflow is complete and offers no further actions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Wire value of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NeedStatus::Analyse => "analyse",
            NeedStatus::Validation => "validation",
            NeedStatus::Detail => "detail",
            NeedStatus::Specification => "specification",
        }
    }
}

impl std::fmt::Display for NeedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NeedStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "analyse" => Ok(NeedStatus::Analyse),
            "validation" => Ok(NeedStatus::Validation),
            "detail" => Ok(NeedStatus::Detail),
            "specification" => Ok(NeedStatus::Specification),
            _ => Err(format!("Unknown need status: {s}")),
        }
    }
}

/// Hard constraints recorded on a need specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificationConstraints {
    #[serde(default)]
    pub regulatory: Option<String>,
    #[serde(default)]
    pub temporal: Option<String>,
    #[serde(default)]
    pub budgetary: Option<String>,
}

/// The specification produced at the end of the need workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    #[serde(default)]
    pub job_story: String,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub out_of_scope: Vec<String>,
    #[serde(default)]
    pub constraints: SpecificationConstraints,
    #[serde(default)]
    pub gap_analysis: String,
    #[serde(default)]
    pub source_quote: String,
}

/// Payload of a `besoin` document.
///
/// `iteration` starts at 1 and only ever increments on a rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedData {
    pub status: NeedStatus,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_iteration")]
    pub iteration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_application_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification: Option<Specification>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_iteration() -> u32 {
    1
}

/// Deployment status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Draft,
    Dev,
    Staging,
    Prod,
    Deprecated,
}

/// A feature listed on an application document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of an `application` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationData {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
