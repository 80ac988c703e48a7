//! REST endpoint paths, relative to the configured base URL.

/// Documents collection: list and create.
pub const DOCUMENTS: &str = "/documents";

/// Single document by id: read, update, delete.
#[must_use]
pub fn document(id: &str) -> String {
    format!("/documents/{id}")
}
