//! Generic create/edit shell around an injected form.

use serde_json::{Map, Value};

use crate::document::Document;
use crate::resource::{EngineError, ResourceConfig, ResourceEngine};

use super::form::{FormContext, FormRenderer};

/// Whether the view creates a new document or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Create,
    Edit,
}

/// Detail shell owning the working form value.
///
/// The form implementation is chosen when the page is built, never
/// swapped at runtime. Submission is guarded against re-entrancy and
/// deletion is a two-step request/confirm sequence.
pub struct ResourceView {
    config: &'static ResourceConfig,
    mode: ViewMode,
    renderer: Box<dyn FormRenderer>,
    form_data: Map<String, Value>,
    initial_id: Option<String>,
    is_submitting: bool,
    delete_requested: bool,
}

impl ResourceView {
    #[must_use]
    pub fn new(
        config: &'static ResourceConfig,
        mode: ViewMode,
        renderer: Box<dyn FormRenderer>,
    ) -> Self {
        Self {
            config,
            mode,
            renderer,
            form_data: Map::new(),
            initial_id: None,
            is_submitting: false,
            delete_requested: false,
        }
    }

    /// Re-sync the working value from freshly loaded initial values.
    ///
    /// Called whenever the page's `current_item` changes; the working
    /// value is replaced wholesale.
    pub fn sync_initial(&mut self, initial: &Document) {
        if let Ok(Value::Object(map)) = serde_json::to_value(initial) {
            self.form_data = map;
        }
        self.initial_id = Some(initial.id.clone());
    }

    /// Fold a partial change into the working value.
    pub fn change(&mut self, partial: &Map<String, Value>) {
        self.form_data = self.renderer.apply_change(&self.form_data, partial);
    }

    /// The current working value.
    #[must_use]
    pub fn form_data(&self) -> &Map<String, Value> {
        &self.form_data
    }

    /// Shell heading.
    #[must_use]
    pub fn title(&self) -> String {
        match self.mode {
            ViewMode::Create => format!("Create {}", self.config.labels.singular),
            ViewMode::Edit => format!("Edit {}", self.config.labels.singular),
        }
    }

    /// Render the chrome plus the injected form.
    #[must_use]
    pub fn render(&self) -> String {
        let ctx = FormContext {
            editing: self.mode == ViewMode::Edit,
            loading: self.is_submitting,
        };
        let mut out = format!("== {} ==\n", self.title());
        out.push_str(&self.renderer.render(&self.form_data, &ctx));
        if self.delete_requested {
            out.push_str("Confirm deletion? This cannot be undone.\n");
        }
        out
    }

    /// Validate and submit the working value through the engine.
    ///
    /// Returns `Ok(None)` when a submission is already in flight (the
    /// second attempt is a no-op). On create, a duplicate title (per the
    /// advisory check) is rejected before the create request is sent.
    ///
    /// # Errors
    ///
    /// [`EngineError::Validation`] before any network call when the form
    /// rejects the value or the title is a duplicate; engine errors
    /// otherwise.
    pub async fn submit(
        &mut self,
        engine: &ResourceEngine,
    ) -> Result<Option<Document>, EngineError> {
        if self.is_submitting {
            return Ok(None);
        }

        self.renderer
            .validate(&self.form_data)
            .map_err(EngineError::Validation)?;

        if self.mode == ViewMode::Create {
            let title = self
                .form_data
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("");
            if title.trim().is_empty() {
                return Err(EngineError::Validation("Title is required".to_owned()));
            }
            if engine.check_title_exists(title, None).await {
                return Err(EngineError::Validation(format!(
                    "A {} with this title already exists",
                    self.config.labels.singular.to_lowercase()
                )));
            }
        }

        self.is_submitting = true;
        let result = match self.mode {
            ViewMode::Create => engine.create(self.form_data.clone()).await,
            ViewMode::Edit => {
                let id = self.initial_id.clone().unwrap_or_default();
                engine.update(&id, self.form_data.clone()).await
            }
        };
        self.is_submitting = false;
        result.map(Some)
    }

    /// First step of deletion: arm the confirmation.
    pub fn request_delete(&mut self) {
        self.delete_requested = true;
    }

    /// Abandon a pending delete request.
    pub fn cancel_delete(&mut self) {
        self.delete_requested = false;
    }

    /// Second step of deletion: only acts after [`Self::request_delete`].
    ///
    /// Returns whether a deletion was performed.
    ///
    /// # Errors
    ///
    /// Engine errors from the delete request.
    pub async fn confirm_delete(&mut self, engine: &ResourceEngine) -> Result<bool, EngineError> {
        if !self.delete_requested || self.is_submitting {
            return Ok(false);
        }

        self.is_submitting = true;
        let id = self.initial_id.clone().unwrap_or_default();
        let result = engine.remove(&id).await;
        self.is_submitting = false;
        self.delete_requested = false;
        result.map(|()| true)
    }
}

impl std::fmt::Debug for ResourceView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceView")
            .field("mode", &self.mode)
            .field("is_submitting", &self.is_submitting)
            .field("delete_requested", &self.delete_requested)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "detail_tests.rs"]
mod tests;
