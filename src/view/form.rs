//! Form-injection seam for the detail view.
//!
//! Each page injects a per-type form into the generic detail shell as a
//! trait object chosen at page construction time. A form renders the
//! working value, folds partial changes into it, and validates it before
//! anything touches the network.

use serde_json::{Map, Value};

use crate::document::get_nested_value;

/// Maximum length (in characters) of a post's content.
pub const POST_CONTENT_MAX_LENGTH: usize = 2000;

/// Render-time context handed to a form.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormContext {
    /// True in edit mode, false when creating.
    pub editing: bool,
    /// True while a submission is in flight.
    pub loading: bool,
}

/// Per-type form behavior injected into [`crate::view::ResourceView`].
pub trait FormRenderer: Send + Sync {
    /// Render the working value as terminal text.
    fn render(&self, value: &Map<String, Value>, ctx: &FormContext) -> String;

    /// Fold a partial change into the working value.
    ///
    /// The default merges top-level keys, change wins.
    fn apply_change(
        &self,
        current: &Map<String, Value>,
        change: &Map<String, Value>,
    ) -> Map<String, Value> {
        let mut merged = current.clone();
        for (key, value) in change {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Validate the working value before submission.
    ///
    /// # Errors
    ///
    /// A human-readable reason when the value must not be submitted.
    fn validate(&self, _value: &Map<String, Value>) -> Result<(), String> {
        Ok(())
    }
}

fn field_line(label: &str, value: Option<&Value>) -> String {
    format!("{label}: {}", crate::document::display_value(value))
}

/// Fallback form that lists every top-level field as-is.
///
/// Used for prompts, models and applications, whose console forms have no
/// client-side rules beyond what the server enforces.
#[derive(Debug, Default)]
pub struct GenericForm;

impl FormRenderer for GenericForm {
    fn render(&self, value: &Map<String, Value>, ctx: &FormContext) -> String {
        let mut out = String::new();
        for (key, val) in value {
            out.push_str(&field_line(key, Some(val)));
            out.push('\n');
        }
        if ctx.loading {
            out.push_str("(saving...)\n");
        }
        out
    }
}

/// Post form: shows the character budget and caps content length.
#[derive(Debug, Default)]
pub struct PostForm;

impl PostForm {
    fn content_len(value: &Map<String, Value>) -> usize {
        value
            .get("data")
            .and_then(|d| d.get("content"))
            .and_then(Value::as_str)
            .map_or(0, |s| s.chars().count())
    }
}

impl FormRenderer for PostForm {
    fn render(&self, value: &Map<String, Value>, ctx: &FormContext) -> String {
        let object = Value::Object(value.clone());
        let remaining =
            POST_CONTENT_MAX_LENGTH.saturating_sub(Self::content_len(value));
        let mut out = String::new();
        out.push_str(&field_line("Title", get_nested_value(&object, "title")));
        out.push('\n');
        out.push_str(&field_line(
            "Platform",
            get_nested_value(&object, "data.platform"),
        ));
        out.push('\n');
        out.push_str(&field_line(
            "Content",
            get_nested_value(&object, "data.content"),
        ));
        out.push('\n');
        out.push_str(&format!("({remaining} characters remaining)\n"));
        if ctx.editing {
            out.push_str("(title is read-only)\n");
        }
        if ctx.loading {
            out.push_str("(saving...)\n");
        }
        out
    }

    fn validate(&self, value: &Map<String, Value>) -> Result<(), String> {
        let len = Self::content_len(value);
        if len > POST_CONTENT_MAX_LENGTH {
            return Err(format!(
                "Content exceeds the maximum length of {POST_CONTENT_MAX_LENGTH} characters ({len})"
            ));
        }
        Ok(())
    }
}

/// Need form: surfaces workflow status, iteration and the last rejection
/// response alongside the content.
#[derive(Debug, Default)]
pub struct NeedForm;

impl FormRenderer for NeedForm {
    fn render(&self, value: &Map<String, Value>, ctx: &FormContext) -> String {
        let object = Value::Object(value.clone());
        let mut out = String::new();
        out.push_str(&field_line("Title", get_nested_value(&object, "title")));
        out.push('\n');
        out.push_str(&field_line("Status", get_nested_value(&object, "data.status")));
        out.push('\n');
        out.push_str(&field_line(
            "Iteration",
            get_nested_value(&object, "data.iteration"),
        ));
        out.push('\n');
        out.push_str(&field_line(
            "Content",
            get_nested_value(&object, "data.content"),
        ));
        out.push('\n');
        if let Some(response) = get_nested_value(&object, "data.response") {
            out.push_str(&field_line("Last rejection response", Some(response)));
            out.push('\n');
        }
        if ctx.loading {
            out.push_str("(saving...)\n");
        }
        out
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
