//! The form store: registry, controller, and the dispatch seam.
//!
//! Dispatch is infallible by design. Commands addressing forms that are
//! gone, or saves that would overlap, are contained here with a `warn!`
//! and an empty event batch; an error thrown mid-dispatch would corrupt
//! the ordering guarantees downstream consumers rely on.

use crate::FormController;
use formwork_model::{DatasetView, Form, FormRegistry};
use formwork_types::{EntityPath, FormCommand, FormEvent, FormKey};
use formwork_validate::MetadataRegistry;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// Owns the form registry and applies commands to it in dispatch order.
pub struct FormStore {
    registry: FormRegistry,
    controller: FormController,
}

impl FormStore {
    /// Creates an empty store validating against `metadata`.
    #[must_use]
    pub fn new(metadata: Arc<MetadataRegistry>) -> Self {
        Self {
            registry: FormRegistry::new(),
            controller: FormController::new(metadata),
        }
    }

    /// Applies one command against the current dataset snapshot.
    ///
    /// Lifecycle errors are contained: the command becomes a no-op and the
    /// batch comes back empty.
    pub fn dispatch(&mut self, command: FormCommand, dataset: &dyn DatasetView) -> Vec<FormEvent> {
        let form_key = command.form_key().cloned();
        match self.controller.apply(command, &mut self.registry, dataset) {
            Ok(events) => events,
            Err(error) => {
                warn!(form_key = ?form_key, "command rejected: {error}");
                Vec::new()
            }
        }
    }

    // ── Selectors ────────────────────────────────────────────────

    /// Looks up a form.
    #[must_use]
    pub fn form(&self, form_key: &FormKey) -> Option<&Form> {
        self.registry.get(form_key)
    }

    /// All registered forms, ordered by form key.
    pub fn forms(&self) -> impl Iterator<Item = &Form> {
        self.registry.forms()
    }

    /// The registry itself, for snapshot serialization.
    #[must_use]
    pub fn registry(&self) -> &FormRegistry {
        &self.registry
    }

    /// A form's raw inputs grouped by entity path, the shape a host save
    /// handler consumes. Fields never touched or synchronized are skipped.
    #[must_use]
    pub fn user_input(
        &self,
        form_key: &FormKey,
    ) -> Option<BTreeMap<EntityPath, BTreeMap<String, Value>>> {
        self.registry.get(form_key).map(Form::user_input)
    }

    /// Renders a field's committed value for consulting-mode display,
    /// through the domain formatter when one is registered.
    #[must_use]
    pub fn formatted_value(
        &self,
        form_key: &FormKey,
        entity_path: &EntityPath,
        name: &str,
    ) -> Option<String> {
        let field = self.registry.get(form_key)?.field(entity_path, name)?;
        Some(
            self.controller
                .metadata()
                .format_value(entity_path, name, &field.data_set_value),
        )
    }
}
