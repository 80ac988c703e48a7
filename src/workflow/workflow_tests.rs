use super::*;
use crate::api::ApiClient;
use crate::auth::StaticTokenProvider;
use crate::resource::config_for;
use serde_json::json;
use std::sync::Arc;

fn offline_engine() -> ResourceEngine {
    let client = ApiClient::new(
        "http://127.0.0.1:1",
        Arc::new(StaticTokenProvider::anonymous()),
    )
    .unwrap();
    ResourceEngine::new(Arc::new(client), config_for(DocumentType::Besoin))
}

fn need(status: &str, iteration: u32) -> Document {
    serde_json::from_value(json!({
        "id": "n1",
        "type": "besoin",
        "title": "Need",
        "theme": ["ops"],
        "tags": ["urgent"],
        "data": {"status": status, "content": "as a user...", "iteration": iteration},
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-02-01T00:00:00Z"
    }))
    .unwrap()
}

fn need_data(status: &str, iteration: u32) -> NeedData {
    decode_data(&need(status, iteration)).unwrap()
}

#[test]
fn test_accept_advances_without_bumping_iteration() {
    let mut data = need_data("analyse", 1);
    assert!(transition(&mut data, WorkflowAction::Accept).unwrap());
    assert_eq!(data.status, NeedStatus::Validation);
    assert_eq!(data.iteration, 1);
}

#[test]
fn test_accept_walks_the_full_order() {
    let mut data = need_data("analyse", 1);
    for expected in [
        NeedStatus::Validation,
        NeedStatus::Detail,
        NeedStatus::Specification,
    ] {
        assert!(transition(&mut data, WorkflowAction::Accept).unwrap());
        assert_eq!(data.status, expected);
    }
    // Terminal: nothing more to accept.
    assert!(!transition(&mut data, WorkflowAction::Accept).unwrap());
    assert_eq!(data.status, NeedStatus::Specification);
}

#[test]
fn test_reject_returns_to_analyse_and_bumps_iteration() {
    let mut data = need_data("detail", 3);
    let done = transition(
        &mut data,
        WorkflowAction::Reject {
            response: "fix X".to_string(),
        },
    )
    .unwrap();
    assert!(done);
    assert_eq!(data.status, NeedStatus::Analyse);
    assert_eq!(data.iteration, 4);
    assert_eq!(data.response.as_deref(), Some("fix X"));
}

#[test]
fn test_reject_at_analyse_stays_but_still_bumps() {
    let mut data = need_data("analyse", 1);
    transition(
        &mut data,
        WorkflowAction::Reject {
            response: "fix X".to_string(),
        },
    )
    .unwrap();
    assert_eq!(data.status, NeedStatus::Analyse);
    assert_eq!(data.iteration, 2);
}

#[test]
fn test_reject_requires_nonblank_response() {
    let mut data = need_data("validation", 2);
    let err = transition(
        &mut data,
        WorkflowAction::Reject {
            response: "   ".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, WorkflowError::ResponseRequired));
    // Payload untouched on refusal.
    assert_eq!(data.status, NeedStatus::Validation);
    assert_eq!(data.iteration, 2);
}

#[test]
fn test_terminal_reject_is_a_noop_before_response_check() {
    let mut data = need_data("specification", 2);
    let done = transition(
        &mut data,
        WorkflowAction::Reject {
            response: String::new(),
        },
    )
    .unwrap();
    assert!(!done);
}

#[test]
fn test_available_actions() {
    assert_eq!(
        available_actions(&need_data("analyse", 1)),
        vec!["accept", "reject"]
    );
    assert!(available_actions(&need_data("specification", 1)).is_empty());
}

#[tokio::test]
async fn test_apply_rejects_non_need_documents() {
    let engine = offline_engine();
    let post: Document = serde_json::from_value(json!({
        "id": "p1",
        "type": "post",
        "title": "Post",
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    }))
    .unwrap();
    let err = apply(&engine, &post, WorkflowAction::Accept)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotANeed(id) if id == "p1"));
}

#[tokio::test]
async fn test_apply_terminal_is_noop_without_request() {
    // The offline engine refuses any request; None proves nothing was sent.
    let engine = offline_engine();
    let result = apply(&engine, &need("specification", 2), WorkflowAction::Accept)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_apply_blank_response_fails_without_request() {
    let engine = offline_engine();
    let err = apply(
        &engine,
        &need("analyse", 1),
        WorkflowAction::Reject {
            response: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, WorkflowError::ResponseRequired));
}
