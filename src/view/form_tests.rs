use super::*;
use serde_json::json;

fn as_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[test]
fn test_post_form_accepts_content_at_cap() {
    let value = as_map(json!({
        "title": "Post",
        "data": {"content": "x".repeat(POST_CONTENT_MAX_LENGTH)}
    }));
    assert!(PostForm.validate(&value).is_ok());
}

#[test]
fn test_post_form_rejects_content_over_cap() {
    let value = as_map(json!({
        "title": "Post",
        "data": {"content": "x".repeat(POST_CONTENT_MAX_LENGTH + 1)}
    }));
    let err = PostForm.validate(&value).unwrap_err();
    assert!(err.contains("2000"));
}

#[test]
fn test_post_form_counts_characters_not_bytes() {
    // 2000 two-byte characters still fit the cap.
    let value = as_map(json!({"data": {"content": "é".repeat(POST_CONTENT_MAX_LENGTH)}}));
    assert!(PostForm.validate(&value).is_ok());
}

#[test]
fn test_post_form_renders_remaining_budget() {
    let value = as_map(json!({"title": "P", "data": {"content": "abcd"}}));
    let out = PostForm.render(&value, &FormContext::default());
    assert!(out.contains("1996 characters remaining"));
}

#[test]
fn test_default_apply_change_merges_top_level() {
    let current = as_map(json!({"title": "Old", "tags": ["a"]}));
    let change = as_map(json!({"title": "New"}));
    let merged = GenericForm.apply_change(&current, &change);
    assert_eq!(merged.get("title"), Some(&json!("New")));
    assert_eq!(merged.get("tags"), Some(&json!(["a"])));
}

#[test]
fn test_need_form_shows_rejection_response() {
    let value = as_map(json!({
        "title": "Need",
        "data": {"status": "analyse", "iteration": 2, "content": "c", "response": "fix X"}
    }));
    let out = NeedForm.render(&value, &FormContext::default());
    assert!(out.contains("Last rejection response: fix X"));
}

#[test]
fn test_generic_form_lists_fields() {
    let value = as_map(json!({"title": "T", "data": {"k": 1}}));
    let out = GenericForm.render(
        &value,
        &FormContext {
            editing: false,
            loading: true,
        },
    );
    assert!(out.contains("title: T"));
    assert!(out.contains("(saving...)"));
}
