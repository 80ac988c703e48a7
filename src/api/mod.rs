//! Authenticated JSON REST client for the knowledge-base API.

pub mod client;
pub mod endpoints;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
