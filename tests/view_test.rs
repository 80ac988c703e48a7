//! Detail view submission rules verified end to end: client-side
//! validation must run before anything reaches the network.

mod common;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{engine_for, post_json};
use kb_console::document::DocumentType;
use kb_console::resource::{config_for, EngineError};
use kb_console::view::{PostForm, ResourceView, ViewMode, POST_CONTENT_MAX_LENGTH};

fn body(title: &str, content: String) -> serde_json::Map<String, serde_json::Value> {
    let mut map = serde_json::Map::new();
    map.insert("title".to_string(), json!(title));
    map.insert("data".to_string(), json!({"content": content}));
    map
}

#[tokio::test]
async fn test_oversized_post_content_never_reaches_the_network() {
    let server = MockServer::start().await;
    // Nothing may be sent at all, not even the duplicate-title lookup.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_json("p1", "X")))
        .expect(0)
        .mount(&server)
        .await;

    let engine = engine_for(&server, DocumentType::Post);
    let mut view = ResourceView::new(
        config_for(DocumentType::Post),
        ViewMode::Create,
        Box::new(PostForm),
    );
    view.change(&body("Launch", "x".repeat(POST_CONTENT_MAX_LENGTH + 1)));

    let err = view.submit(&engine).await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(msg) if msg.contains("2000")));
}

#[tokio::test]
async fn test_create_with_duplicate_title_is_refused() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json("p1", "Launch")])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_json("p2", "Launch")))
        .expect(0)
        .mount(&server)
        .await;

    let engine = engine_for(&server, DocumentType::Post);
    let mut view = ResourceView::new(
        config_for(DocumentType::Post),
        ViewMode::Create,
        Box::new(PostForm),
    );
    view.change(&body("launch", "ok".to_string()));

    let err = view.submit(&engine).await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(msg) if msg.contains("already exists")));
}

#[tokio::test]
async fn test_create_happy_path_posts_the_form() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_json("p1", "Launch")))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server, DocumentType::Post);
    let mut view = ResourceView::new(
        config_for(DocumentType::Post),
        ViewMode::Create,
        Box::new(PostForm),
    );
    view.change(&body("Launch", "ok".to_string()));

    let created = view.submit(&engine).await.expect("submit").expect("created");
    assert_eq!(created.id, "p1");
}

#[tokio::test]
async fn test_edit_skips_duplicate_check_and_puts() {
    let server = MockServer::start().await;
    // No GET lookup in edit mode.
    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/documents/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json("p1", "Launch")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/documents/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json("p1", "Launch v2")))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server, DocumentType::Post);
    engine.fetch_one("p1").await.expect("fetch_one");
    let current = engine.state().current_item.expect("loaded");

    let mut view = ResourceView::new(
        config_for(DocumentType::Post),
        ViewMode::Edit,
        Box::new(PostForm),
    );
    view.sync_initial(&current);
    view.change(&body("Launch v2", "ok".to_string()));

    let updated = view.submit(&engine).await.expect("submit").expect("updated");
    assert_eq!(updated.title.as_deref(), Some("Launch v2"));
}

#[tokio::test]
async fn test_two_step_delete_sends_exactly_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json("p1", "Launch")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/documents/p1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server, DocumentType::Post);
    engine.fetch_one("p1").await.expect("fetch_one");
    let current = engine.state().current_item.expect("loaded");

    let mut view = ResourceView::new(
        config_for(DocumentType::Post),
        ViewMode::Edit,
        Box::new(PostForm),
    );
    view.sync_initial(&current);

    // Unconfirmed: nothing happens.
    assert!(!view.confirm_delete(&engine).await.expect("no-op"));

    view.request_delete();
    assert!(view.confirm_delete(&engine).await.expect("delete"));
    assert!(engine.state().current_item.is_none());
}
