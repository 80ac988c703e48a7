//! Safe dotted-path access into JSON values.

use serde_json::Value;

/// Walk a dotted path (`"data.platform"`) through nested JSON objects.
///
/// Returns `None` when any intermediate step is absent or not an object,
/// so callers never need to pre-validate the shape.
#[must_use]
pub fn get_nested_value<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for key in path.split('.') {
        current = current.as_object()?.get(key)?;
    }
    Some(current)
}

/// Human display form of an optional JSON value.
///
/// Strings render without quotes, `null`/absent render empty, everything
/// else renders as compact JSON.
#[must_use]
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
