//! The form lifecycle controller: one transition function for every command.
//!
//! The controller is a pure applicator. It owns no state of its own beyond
//! the validation metadata; the registry it mutates and the dataset it
//! reads are handed in per call, so the single-writer guarantee is the
//! caller's to arrange (the bus module does) and tests can drive
//! transitions directly.

use crate::error::{ControllerError, ControllerResult};
use crate::sync::snapshot_entity_fields;
use formwork_model::{DatasetView, FormRegistry, RegistryError};
use formwork_types::{
    EntityPath, FieldPatch, FormCommand, FormEvent, FormKey, HostAction, TransportStatus,
};
use formwork_validate::{MetadataRegistry, filter_non_validated_fields, validate_field};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Applies commands to a form registry using shared validation metadata.
pub struct FormController {
    metadata: Arc<MetadataRegistry>,
}

impl FormController {
    /// Creates a controller validating against `metadata`.
    #[must_use]
    pub fn new(metadata: Arc<MetadataRegistry>) -> Self {
        Self { metadata }
    }

    /// Returns the validation metadata.
    #[must_use]
    pub fn metadata(&self) -> &MetadataRegistry {
        &self.metadata
    }

    /// Applies a single command, returning the events it produced.
    ///
    /// Transitions run to completion synchronously; a returned error means
    /// the registry was not changed by this command.
    pub fn apply(
        &self,
        command: FormCommand,
        registry: &mut FormRegistry,
        dataset: &dyn DatasetView,
    ) -> ControllerResult<Vec<FormEvent>> {
        match command {
            FormCommand::Create {
                form_key,
                entity_paths,
            } => self.apply_create(form_key, entity_paths, registry, dataset),
            FormCommand::Destroy { form_key } => self.apply_destroy(&form_key, registry),
            FormCommand::ToggleEditing { form_key, edit } => {
                self.apply_toggle_editing(&form_key, edit, registry)
            }
            FormCommand::InputChange {
                form_key,
                entity_path,
                name,
                value,
            } => self.apply_input_change(&form_key, &entity_path, &name, value, registry),
            FormCommand::InputBlur {
                form_key,
                entity_path,
                name,
                value,
            } => self.apply_input_blur(&form_key, &entity_path, &name, value, registry),
            FormCommand::InputBlurList {
                form_key,
                entity_path,
                name,
                property_name_line,
                index,
                value,
            } => self.apply_input_blur_list(
                &form_key,
                &entity_path,
                &name,
                &property_name_line,
                index,
                value,
                registry,
            ),
            FormCommand::Validate {
                form_key,
                non_validated_fields,
                save_action,
            } => self.apply_validate(&form_key, &non_validated_fields, save_action, registry),
            FormCommand::Reset { form_key } => self.apply_reset(&form_key, registry),
            FormCommand::DatasetChanged {
                entity_path,
                status,
                saving,
            } => self.apply_dataset_changed(&entity_path, status, saving, registry, dataset),
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────

    fn apply_create(
        &self,
        form_key: FormKey,
        entity_paths: Vec<EntityPath>,
        registry: &mut FormRegistry,
        dataset: &dyn DatasetView,
    ) -> ControllerResult<Vec<FormEvent>> {
        let mut fields = Vec::new();
        for path in &entity_paths {
            fields.extend(snapshot_entity_fields(dataset, path, true));
        }
        debug!(
            "registering form {} with {} snapshotted fields",
            form_key,
            fields.len()
        );
        registry.create(form_key, entity_paths, fields)?;
        Ok(Vec::new())
    }

    fn apply_destroy(
        &self,
        form_key: &FormKey,
        registry: &mut FormRegistry,
    ) -> ControllerResult<Vec<FormEvent>> {
        let form = registry.destroy(form_key)?;
        debug!(
            "destroyed form {} and its {} fields",
            form_key,
            form.field_count()
        );
        Ok(Vec::new())
    }

    fn apply_toggle_editing(
        &self,
        form_key: &FormKey,
        edit: bool,
        registry: &mut FormRegistry,
    ) -> ControllerResult<Vec<FormEvent>> {
        // Leaving edit mode is a cancellation: unsaved raw inputs are
        // discarded and an in-flight save flag cannot survive consulting.
        if !edit {
            registry.reset_inputs(form_key)?;
            registry.set_saving(form_key, false)?;
        }
        registry.set_editing(form_key, edit)?;
        Ok(Vec::new())
    }

    // ── Input ────────────────────────────────────────────────────

    fn apply_input_change(
        &self,
        form_key: &FormKey,
        entity_path: &EntityPath,
        name: &str,
        value: Value,
        registry: &mut FormRegistry,
    ) -> ControllerResult<Vec<FormEvent>> {
        if !self.form_is_editing(registry, form_key)? {
            return Ok(Vec::new());
        }
        registry.upsert_field(form_key, entity_path, name, &FieldPatch::raw_input(value))?;
        Ok(Vec::new())
    }

    fn apply_input_blur(
        &self,
        form_key: &FormKey,
        entity_path: &EntityPath,
        name: &str,
        value: Value,
        registry: &mut FormRegistry,
    ) -> ControllerResult<Vec<FormEvent>> {
        if !self.form_is_editing(registry, form_key)? {
            return Ok(Vec::new());
        }

        // Blur gives immediate feedback; the value is stored either way
        // and only a save is gated on validity.
        let mut events = Vec::new();
        validate_field(
            &self.metadata,
            form_key,
            entity_path,
            name,
            Some(&value),
            &mut |error| events.push(FormEvent::FieldInvalid(error)),
        );
        registry.upsert_field(form_key, entity_path, name, &FieldPatch::raw_input(value))?;
        Ok(events)
    }

    fn apply_input_blur_list(
        &self,
        form_key: &FormKey,
        entity_path: &EntityPath,
        name: &str,
        property: &str,
        index: usize,
        value: Value,
        registry: &mut FormRegistry,
    ) -> ControllerResult<Vec<FormEvent>> {
        if !self.form_is_editing(registry, form_key)? {
            return Ok(Vec::new());
        }

        let patched =
            registry.patch_list_line(form_key, entity_path, name, property, index, value)?;
        if !patched {
            warn!(
                "list blur for {}.{}[{}].{} found nothing to patch",
                entity_path, name, index, property
            );
        }
        Ok(Vec::new())
    }

    // ── Save flow ────────────────────────────────────────────────

    fn apply_validate(
        &self,
        form_key: &FormKey,
        non_validated_fields: &[String],
        save_action: HostAction,
        registry: &mut FormRegistry,
    ) -> ControllerResult<Vec<FormEvent>> {
        let form = registry
            .get(form_key)
            .ok_or_else(|| RegistryError::UnknownForm(form_key.clone()))?;

        // Every candidate field is validated even after a failure, so the
        // host receives the full set of notifications in one pass.
        let mut events = Vec::new();
        let mut all_valid = true;
        for field in filter_non_validated_fields(form.fields(), non_validated_fields) {
            all_valid &= validate_field(
                &self.metadata,
                form_key,
                &field.entity_path,
                &field.name,
                field.raw_input_value.as_ref(),
                &mut |error| events.push(FormEvent::FieldInvalid(error)),
            );
        }

        if !all_valid {
            debug!("form {} failed validation; save not requested", form_key);
            return Ok(events);
        }

        if let Some(other) = registry.saving_overlap(form_key) {
            return Err(ControllerError::OverlappingSave {
                form_key: form_key.clone(),
                saving_form_key: other.form_key().clone(),
            });
        }

        registry.set_saving(form_key, true)?;
        debug!("form {} validated; requesting save", form_key);
        events.push(FormEvent::SavingStarted {
            form_key: form_key.clone(),
        });
        events.push(FormEvent::SaveRequested {
            form_key: form_key.clone(),
            action: save_action,
        });
        Ok(events)
    }

    // ── Synchronization ──────────────────────────────────────────

    fn apply_reset(
        &self,
        form_key: &FormKey,
        registry: &mut FormRegistry,
    ) -> ControllerResult<Vec<FormEvent>> {
        registry.reset_inputs(form_key)?;
        Ok(Vec::new())
    }

    fn apply_dataset_changed(
        &self,
        entity_path: &EntityPath,
        status: TransportStatus,
        saving: bool,
        registry: &mut FormRegistry,
        dataset: &dyn DatasetView,
    ) -> ControllerResult<Vec<FormEvent>> {
        let records = snapshot_entity_fields(dataset, entity_path, status.is_success());
        let touched = registry.sync_entity(entity_path, &records);
        debug!(
            "dataset change at {} ({}) reached {} forms",
            entity_path, status, touched
        );

        let mut events = vec![FormEvent::EntitySynced {
            entity_path: entity_path.clone(),
            fields: records,
        }];

        // Commit edge of a save round-trip: the one saving form observing
        // this path returns to consulting mode. Raw inputs were already
        // refreshed by the merge above.
        if saving && status.is_success() {
            let committed = registry
                .saving_form_observing(entity_path)
                .map(|form| form.form_key().clone());
            match committed {
                Some(form_key) => {
                    registry.set_saving(&form_key, false)?;
                    registry.set_editing(&form_key, false)?;
                    events.push(FormEvent::EditingToggled {
                        form_key,
                        edit: false,
                    });
                }
                None => {
                    debug!("save committed at {} with no saving form observing it", entity_path);
                }
            }
        }

        Ok(events)
    }

    fn form_is_editing(
        &self,
        registry: &FormRegistry,
        form_key: &FormKey,
    ) -> ControllerResult<bool> {
        let form = registry
            .get(form_key)
            .ok_or_else(|| RegistryError::UnknownForm(form_key.clone()))?;
        if !form.edit() {
            warn!("ignoring input for form {} in consulting mode", form_key);
        }
        Ok(form.edit())
    }
}
