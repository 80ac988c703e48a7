//! Mongo extended-JSON date handling.
//!
//! The API serves timestamps either as plain ISO strings or wrapped in the
//! Mongo extended form `{"$date": "..."}`. Both are accepted everywhere a
//! date appears, and formatting never panics: malformed input falls back to
//! a caller-supplied default.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default display string for absent or unparseable dates.
pub const DATE_FALLBACK: &str = "not set";

/// A date value in either wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MongoDate {
    Extended {
        #[serde(rename = "$date")]
        date: String,
    },
    Iso(String),
}

impl MongoDate {
    /// The raw ISO string regardless of wire shape.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            MongoDate::Extended { date } | MongoDate::Iso(date) => date,
        }
    }

    /// Parse to a chrono timestamp, `None` when the string is not RFC 3339.
    #[must_use]
    pub fn parse(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.as_str()).ok()
    }
}

impl From<&str> for MongoDate {
    fn from(s: &str) -> Self {
        MongoDate::Iso(s.to_string())
    }
}

fn date_string_of(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("$date").and_then(Value::as_str),
        _ => None,
    }
}

fn format_with(value: &Value, pattern: &str, default: &str) -> String {
    let Some(raw) = date_string_of(value) else {
        return default.to_string();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.format(pattern).to_string(),
        Err(_) => default.to_string(),
    }
}

/// Format a date value as `dd/mm/yyyy`.
///
/// Accepts a JSON string, a `{"$date": ...}` object, or anything else
/// (including `null`), returning `default` for the latter. Never panics.
#[must_use]
pub fn format_mongo_date(value: &Value, default: &str) -> String {
    format_with(value, "%d/%m/%Y", default)
}

/// Format a date value as `dd/mm/yyyy hh:mm`.
#[must_use]
pub fn format_mongo_date_time(value: &Value, default: &str) -> String {
    format_with(value, "%d/%m/%Y %H:%M", default)
}

#[cfg(test)]
#[path = "date_tests.rs"]
mod tests;
