//! Generic CRUD/pagination engine.
//!
//! One engine instance backs one logical page. State lives behind a mutex
//! so the instance can be driven from async tasks, but there is a single
//! writer per page and operations apply their results last-write-wins,
//! with one exception: paged fetches carry a generation stamp, and a
//! completion from a superseded generation is discarded instead of
//! clobbering newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::{endpoints, ApiClient, ApiError};
use crate::document::{Document, DocumentListResponse, PartialDocument};

use super::config::ResourceConfig;

/// Default page size for [`ResourceEngine::fetch_all`].
pub const DEFAULT_PAGE_LIMIT: usize = 25;

const TITLE_CHECK_LIMIT: usize = 10;

/// Error raised by engine operations.
///
/// Every failure is also mirrored into [`ResourceState::error`] as a
/// display string before the typed error is returned.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("An id is required to {action} the resource")]
    MissingId { action: &'static str },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Per-instance engine state.
///
/// Created fresh with each engine; nothing is shared across instances, so
/// two pages showing the same type can observe different data until their
/// next fetch.
#[derive(Debug, Clone, Default)]
pub struct ResourceState {
    pub items: Vec<Document>,
    pub current_item: Option<Document>,
    pub loading: bool,
    pub error: Option<String>,
    pub total: usize,
}

/// Callback invoked when an update succeeded while the cached list still
/// holds the old revision of that document.
pub type ItemsStaleHandler = Box<dyn Fn(&str) + Send + Sync>;

/// Generic CRUD controller parameterized by a [`ResourceConfig`].
pub struct ResourceEngine {
    client: Arc<ApiClient>,
    config: &'static ResourceConfig,
    state: Mutex<ResourceState>,
    generation: AtomicU64,
    on_items_stale: Option<ItemsStaleHandler>,
}

impl ResourceEngine {
    #[must_use]
    pub fn new(client: Arc<ApiClient>, config: &'static ResourceConfig) -> Self {
        Self {
            client,
            config,
            state: Mutex::new(ResourceState::default()),
            generation: AtomicU64::new(0),
            on_items_stale: None,
        }
    }

    /// Register a handler for the update/list cache-coherence gap.
    ///
    /// The list is deliberately not patched on `update`; this handler
    /// makes the staleness explicit so consumers re-fetch instead of
    /// silently diverging.
    #[must_use]
    pub fn with_items_stale_handler(mut self, handler: ItemsStaleHandler) -> Self {
        self.on_items_stale = Some(handler);
        self
    }

    /// The configuration this engine is bound to.
    #[must_use]
    pub fn config(&self) -> &'static ResourceConfig {
        self.config
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ResourceState {
        self.lock().clone()
    }

    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    pub fn clear_current_item(&self) {
        self.lock().current_item = None;
    }

    /// Fetch one page of documents of this engine's type, newest first.
    ///
    /// Accepts both response shapes (`[...]` or `{items, total}`) and
    /// normalizes them; an unrecognized shape yields an empty page rather
    /// than an error. On failure the previous `items`/`total` are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`EngineError::Api`] when the request fails.
    pub async fn fetch_all(&self, limit: usize, skip: usize) -> Result<(), EngineError> {
        let generation = self.next_generation();
        self.begin();

        let params = [
            ("type", self.config.resource_type.to_string()),
            ("limit", limit.to_string()),
            ("skip", skip.to_string()),
            ("sort", "-updated_at".to_string()),
        ];
        let result = self.client.get::<Value>(endpoints::DOCUMENTS, &params).await;

        if self.is_stale(generation) {
            debug!(
                resource_type = %self.config.resource_type,
                "discarding stale fetch_all result"
            );
            return Ok(());
        }

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(payload) => {
                let (items, total) = normalize_list(payload);
                state.items = items;
                state.total = total;
                Ok(())
            }
            Err(err) => {
                warn!(
                    resource_type = %self.config.resource_type,
                    error = %err,
                    "fetch_all failed"
                );
                state.error = Some(format!("Failed to load data: {err}"));
                Err(err.into())
            }
        }
    }

    /// Fetch a single document into `current_item`.
    ///
    /// # Errors
    ///
    /// [`EngineError::MissingId`] synchronously when `id` is empty (no
    /// request is issued); [`EngineError::Api`] when the request fails.
    pub async fn fetch_one(&self, id: &str) -> Result<(), EngineError> {
        if id.is_empty() {
            return Err(self.missing_id("load"));
        }

        let generation = self.next_generation();
        self.begin();

        let result = self
            .client
            .get::<Document>(&endpoints::document(id), &[])
            .await;

        if self.is_stale(generation) {
            debug!(id, "discarding stale fetch_one result");
            return Ok(());
        }

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(doc) => {
                state.current_item = Some(doc);
                Ok(())
            }
            Err(err) => {
                warn!(id, error = %err, "fetch_one failed");
                state.error = Some(format!("Failed to load the resource: {err}"));
                Err(err.into())
            }
        }
    }

    /// Create a document, forcing this engine's `type` into the payload.
    ///
    /// Returns the server-assigned document; the cached list is not
    /// touched.
    ///
    /// # Errors
    ///
    /// [`EngineError::Api`] when the request fails.
    pub async fn create(&self, data: PartialDocument) -> Result<Document, EngineError> {
        self.begin();

        let mut payload = data;
        // The caller cannot smuggle a different type through `data`.
        payload.insert(
            "type".to_string(),
            Value::String(self.config.resource_type.to_string()),
        );

        let result = self
            .client
            .post::<Document>(endpoints::DOCUMENTS, &payload)
            .await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(doc) => Ok(doc),
            Err(err) => {
                warn!(
                    resource_type = %self.config.resource_type,
                    error = %err,
                    "create failed"
                );
                state.error = Some(format!("Failed to create: {err}"));
                Err(err.into())
            }
        }
    }

    /// Update a document.
    ///
    /// On success `current_item` is replaced only when its id matches; the
    /// cached list is deliberately left stale (see
    /// [`ResourceEngine::with_items_stale_handler`]).
    ///
    /// # Errors
    ///
    /// [`EngineError::MissingId`] synchronously when `id` is empty;
    /// [`EngineError::Api`] when the request fails.
    pub async fn update(&self, id: &str, data: PartialDocument) -> Result<Document, EngineError> {
        if id.is_empty() {
            return Err(self.missing_id("update"));
        }

        self.begin();

        let result = self
            .client
            .put::<Document>(&endpoints::document(id), &data)
            .await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(doc) => {
                if state
                    .current_item
                    .as_ref()
                    .is_some_and(|current| current.id == id)
                {
                    state.current_item = Some(doc.clone());
                }
                let list_is_stale = state.items.iter().any(|item| item.id == id);
                drop(state);
                if list_is_stale {
                    if let Some(handler) = &self.on_items_stale {
                        handler(id);
                    }
                }
                Ok(doc)
            }
            Err(err) => {
                warn!(id, error = %err, "update failed");
                state.error = Some(format!("Failed to update: {err}"));
                Err(err.into())
            }
        }
    }

    /// Delete a document and keep the local cache coherent.
    ///
    /// The matching entry is removed from `items` (relative order of the
    /// rest preserved) and `current_item` is cleared when it matches.
    ///
    /// # Errors
    ///
    /// [`EngineError::MissingId`] synchronously when `id` is empty;
    /// [`EngineError::Api`] when the request fails.
    pub async fn remove(&self, id: &str) -> Result<(), EngineError> {
        if id.is_empty() {
            return Err(self.missing_id("delete"));
        }

        self.begin();

        let result = self.client.delete(&endpoints::document(id)).await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(_) => {
                state.items.retain(|item| item.id != id);
                state.total = state.total.saturating_sub(1);
                if state
                    .current_item
                    .as_ref()
                    .is_some_and(|current| current.id == id)
                {
                    state.current_item = None;
                }
                Ok(())
            }
            Err(err) => {
                warn!(id, error = %err, "remove failed");
                state.error = Some(format!("Failed to delete: {err}"));
                Err(err.into())
            }
        }
    }

    /// Advisory duplicate-title check.
    ///
    /// The server-side `q` filter is treated as a superset search; the
    /// decisive comparison is a case-insensitive exact match done here.
    /// A failed lookup answers `false` — uniqueness is advisory and must
    /// never block on a transient fault.
    pub async fn check_title_exists(&self, title: &str, exclude_id: Option<&str>) -> bool {
        if title.is_empty() {
            return false;
        }

        let params = [
            ("type", self.config.resource_type.to_string()),
            ("q", title.to_string()),
            ("limit", TITLE_CHECK_LIMIT.to_string()),
        ];
        let payload = match self.client.get::<Value>(endpoints::DOCUMENTS, &params).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(title, error = %err, "title existence check failed");
                return false;
            }
        };

        let (items, _) = normalize_list(payload);
        let wanted = title.to_lowercase();
        items.iter().any(|doc| {
            let same_title = doc.title_or_empty().to_lowercase() == wanted;
            let different_id = exclude_id.is_none_or(|excluded| doc.id != excluded);
            same_title && different_id
        })
    }

    fn lock(&self) -> MutexGuard<'_, ResourceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) {
        let mut state = self.lock();
        state.loading = true;
        state.error = None;
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    fn missing_id(&self, action: &'static str) -> EngineError {
        let err = EngineError::MissingId { action };
        self.lock().error = Some(err.to_string());
        err
    }
}

impl std::fmt::Debug for ResourceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceEngine")
            .field("resource_type", &self.config.resource_type)
            .finish_non_exhaustive()
    }
}

/// Normalize the two accepted list shapes to `(items, total)`.
///
/// Bare array → `total` is the array length. `{items, total}` → the given
/// total, falling back to `items.len()` when absent or zero. Anything
/// else → empty page.
fn normalize_list(payload: Value) -> (Vec<Document>, usize) {
    match payload {
        Value::Array(_) => {
            let items: Vec<Document> = serde_json::from_value(payload).unwrap_or_default();
            let total = items.len();
            (items, total)
        }
        Value::Object(_) => {
            let page: DocumentListResponse = serde_json::from_value(payload).unwrap_or_default();
            let total = if page.total > 0 {
                page.total
            } else {
                page.items.len()
            };
            (page.items, total)
        }
        _ => (Vec::new(), 0),
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
