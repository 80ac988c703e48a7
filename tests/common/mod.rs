//! Common test utilities: a mock API server plus sample document payloads.

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::MockServer;

use kb_console::api::ApiClient;
use kb_console::auth::StaticTokenProvider;
use kb_console::document::DocumentType;
use kb_console::resource::{config_for, ResourceEngine};

#[allow(dead_code)] // Test utility for integration tests
pub const TEST_TOKEN: &str = "test-token-123";

#[allow(dead_code)] // Test utility for integration tests
pub fn client_for(server: &MockServer) -> Arc<ApiClient> {
    let provider = Arc::new(StaticTokenProvider::new(TEST_TOKEN.to_string()));
    Arc::new(ApiClient::new(server.uri(), provider).expect("client construction"))
}

#[allow(dead_code)] // Test utility for integration tests
pub fn engine_for(server: &MockServer, doc_type: DocumentType) -> ResourceEngine {
    ResourceEngine::new(client_for(server), config_for(doc_type))
}

#[allow(dead_code)] // Test utility for integration tests
pub fn post_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "type": "post",
        "title": title,
        "data": {"platform": "linkedin", "content": "hello"},
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-02-01T00:00:00Z"
    })
}

#[allow(dead_code)] // Test utility for integration tests
pub fn need_json(id: &str, status: &str, iteration: u32) -> Value {
    json!({
        "id": id,
        "type": "besoin",
        "title": format!("Need {id}"),
        "theme": ["ops"],
        "tags": ["urgent"],
        "data": {
            "status": status,
            "content": "as a user...",
            "iteration": iteration
        },
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-02-01T00:00:00Z"
    })
}
