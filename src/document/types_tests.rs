use super::*;
use serde_json::json;

#[test]
fn test_document_type_wire_values() {
    assert_eq!(DocumentType::Post.as_str(), "post");
    assert_eq!(DocumentType::Besoin.as_str(), "besoin");
    assert_eq!(
        serde_json::to_value(DocumentType::Application).unwrap(),
        json!("application")
    );
}

#[test]
fn test_document_type_from_str_accepts_need_alias() {
    assert_eq!("besoin".parse::<DocumentType>().unwrap(), DocumentType::Besoin);
    assert_eq!("need".parse::<DocumentType>().unwrap(), DocumentType::Besoin);
    assert_eq!("POST".parse::<DocumentType>().unwrap(), DocumentType::Post);
    assert!("widget".parse::<DocumentType>().is_err());
}

#[test]
fn test_document_deserializes_minimal_shape() {
    let doc: Document = serde_json::from_value(json!({
        "id": "doc-1",
        "type": "prompt",
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-02T00:00:00Z"
    }))
    .unwrap();

    assert_eq!(doc.id, "doc-1");
    assert_eq!(doc.doc_type, DocumentType::Prompt);
    assert!(doc.title.is_none());
    assert!(doc.theme.is_empty());
    assert!(doc.data.is_empty());
}

#[test]
fn test_document_roundtrips_with_payload() {
    let doc: Document = serde_json::from_value(json!({
        "id": "doc-2",
        "type": "post",
        "title": "Launch notes",
        "theme": ["ai"],
        "tags": ["release"],
        "data": {"platform": "linkedin", "content": "Hello"},
        "links": [{"url": "https://example.com", "label": "source"}],
        "created_at": {"$date": "2025-03-01T08:00:00Z"},
        "updated_at": "2025-03-02T08:00:00Z"
    }))
    .unwrap();

    let value = serde_json::to_value(&doc).unwrap();
    let back: Document = serde_json::from_value(value).unwrap();
    assert_eq!(doc, back);
    assert_eq!(back.data.get("platform"), Some(&json!("linkedin")));
}

#[test]
fn test_title_or_empty() {
    let doc: Document = serde_json::from_value(json!({
        "id": "x",
        "type": "model",
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    }))
    .unwrap();
    assert_eq!(doc.title_or_empty(), "");
}
