//! Need validation workflow.
//!
//! Needs move through a strict forward order of stages:
//! analyse, validation, detail, specification. Accepting advances one
//! stage; rejecting returns to analyse from anywhere, records the
//! reviewer's response and bumps the iteration counter by one. The
//! terminal stage offers no further actions.

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::document::{
    decode_data, encode_data, Document, DocumentType, NeedData, NeedStatus, PartialDocument,
};
use crate::resource::{EngineError, ResourceEngine};

/// A reviewer decision on a need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowAction {
    /// Advance to the next stage.
    Accept,
    /// Send back to analyse with a mandatory response.
    Reject { response: String },
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("A response is required to reject a need")]
    ResponseRequired,

    #[error("Document {0} is not a need")]
    NotANeed(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Apply a reviewer decision to a need and persist it.
///
/// Returns the updated document, or `None` when the need is already at
/// the terminal stage (no transition is offered there, for either
/// action). The update body carries the full payload plus the unchanged
/// `theme`/`tags` so the server never sees a partial `data` map.
///
/// # Errors
///
/// [`WorkflowError::NotANeed`] when the document is not a need or its
/// payload does not decode; [`WorkflowError::ResponseRequired`] when a
/// rejection carries a blank response; engine errors from the update.
pub async fn apply(
    engine: &ResourceEngine,
    need: &Document,
    action: WorkflowAction,
) -> Result<Option<Document>, WorkflowError> {
    if need.doc_type != DocumentType::Besoin {
        return Err(WorkflowError::NotANeed(need.id.clone()));
    }
    let mut data: NeedData =
        decode_data(need).map_err(|_| WorkflowError::NotANeed(need.id.clone()))?;

    if !transition(&mut data, action)? {
        info!(id = %need.id, "need already validated, ignoring action");
        return Ok(None);
    }

    let body =
        transition_body(need, &data).map_err(|_| WorkflowError::NotANeed(need.id.clone()))?;

    info!(
        id = %need.id,
        status = %data.status,
        iteration = data.iteration,
        "applying need transition"
    );
    let updated = engine.update(&need.id, body).await?;
    Ok(Some(updated))
}

/// Mutate a need payload per the decision. Returns `false` (payload
/// untouched) at the terminal stage.
///
/// # Errors
///
/// [`WorkflowError::ResponseRequired`] when a rejection carries a blank
/// response; the payload is left untouched in that case too.
pub fn transition(data: &mut NeedData, action: WorkflowAction) -> Result<bool, WorkflowError> {
    let Some(next) = data.status.next() else {
        return Ok(false);
    };

    match action {
        WorkflowAction::Accept => {
            data.status = next;
        }
        WorkflowAction::Reject { response } => {
            let trimmed = response.trim();
            if trimmed.is_empty() {
                return Err(WorkflowError::ResponseRequired);
            }
            data.status = NeedStatus::Analyse;
            data.iteration = data.iteration.saturating_add(1);
            data.response = Some(trimmed.to_owned());
        }
    }
    Ok(true)
}

/// Available actions at a need's current stage, for display.
#[must_use]
pub fn available_actions(data: &NeedData) -> Vec<&'static str> {
    if data.status.is_terminal() {
        return Vec::new();
    }
    vec!["accept", "reject"]
}

fn transition_body(need: &Document, data: &NeedData) -> Result<PartialDocument, serde_json::Error> {
    let mut body = PartialDocument::new();
    body.insert("data".to_owned(), Value::Object(encode_data(data)?));
    body.insert(
        "theme".to_owned(),
        Value::Array(need.theme.iter().cloned().map(Value::String).collect()),
    );
    body.insert(
        "tags".to_owned(),
        Value::Array(need.tags.iter().cloned().map(Value::String).collect()),
    );
    Ok(body)
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
