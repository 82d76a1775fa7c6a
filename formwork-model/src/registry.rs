//! The form registry: the single state slice owning every form and field.
//!
//! All writes flow through the methods here so the ownership story stays
//! simple: components outside this crate get `&Form` projections and can
//! never hold a field across a transition.

use crate::Form;
use formwork_types::{EntityPath, Field, FieldPatch, FormKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result type alias using the registry's error type.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors from registry operations.
///
/// The registry API is strict: addressing an absent form is an error.
/// Callers that want no-op semantics (the dispatch path does) contain
/// these themselves.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("a form is already registered under key {0}")]
    DuplicateForm(FormKey),

    #[error("no form registered under key {0}")]
    UnknownForm(FormKey),
}

/// Holds every registered form, keyed by form key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormRegistry {
    forms: BTreeMap<FormKey, Form>,
}

impl FormRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a form with its initial field snapshot. The form starts
    /// in consulting mode (`edit = false`, `saving = false`).
    pub fn create(
        &mut self,
        form_key: FormKey,
        entity_paths: Vec<EntityPath>,
        fields: Vec<Field>,
    ) -> RegistryResult<()> {
        if self.forms.contains_key(&form_key) {
            return Err(RegistryError::DuplicateForm(form_key));
        }
        let form = Form::new(form_key.clone(), entity_paths, fields);
        self.forms.insert(form_key, form);
        Ok(())
    }

    /// Removes a form and every field it owns, returning it.
    pub fn destroy(&mut self, form_key: &FormKey) -> RegistryResult<Form> {
        self.forms
            .remove(form_key)
            .ok_or_else(|| RegistryError::UnknownForm(form_key.clone()))
    }

    /// Looks up a form.
    #[must_use]
    pub fn get(&self, form_key: &FormKey) -> Option<&Form> {
        self.forms.get(form_key)
    }

    #[must_use]
    pub fn contains(&self, form_key: &FormKey) -> bool {
        self.forms.contains_key(form_key)
    }

    /// All registered forms, ordered by form key.
    pub fn forms(&self) -> impl Iterator<Item = &Form> {
        self.forms.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Flips a form's editing mode. This is the bare flag write; discard
    /// semantics on leaving edit mode live in the lifecycle layer.
    pub fn set_editing(&mut self, form_key: &FormKey, edit: bool) -> RegistryResult<()> {
        self.form_mut(form_key)?.set_edit(edit);
        Ok(())
    }

    /// Flips a form's saving flag.
    pub fn set_saving(&mut self, form_key: &FormKey, saving: bool) -> RegistryResult<()> {
        self.form_mut(form_key)?.set_saving(saving);
        Ok(())
    }

    /// Applies a patch to one field of a form, materializing the field
    /// from the default template when it does not exist yet.
    pub fn upsert_field(
        &mut self,
        form_key: &FormKey,
        entity_path: &EntityPath,
        name: &str,
        patch: &FieldPatch,
    ) -> RegistryResult<()> {
        self.form_mut(form_key)?.upsert_field(entity_path, name, patch);
        Ok(())
    }

    /// Writes one property of one line of a list-valued field. `Ok(false)`
    /// means the form exists but there was nothing to patch.
    pub fn patch_list_line(
        &mut self,
        form_key: &FormKey,
        entity_path: &EntityPath,
        name: &str,
        property: &str,
        index: usize,
        value: serde_json::Value,
    ) -> RegistryResult<bool> {
        Ok(self
            .form_mut(form_key)?
            .patch_list_line(entity_path, name, property, index, value))
    }

    /// Merges dataset records into every form observing `path`, in one
    /// pass. Returns how many forms were touched.
    pub fn sync_entity(&mut self, path: &EntityPath, records: &[Field]) -> usize {
        let mut touched = 0;
        for form in self.forms.values_mut() {
            if form.observes(path) {
                form.merge_records(records);
                touched += 1;
            }
        }
        touched
    }

    /// Restores every raw input of a form from its dataset value.
    pub fn reset_inputs(&mut self, form_key: &FormKey) -> RegistryResult<()> {
        self.form_mut(form_key)?.reset_inputs();
        Ok(())
    }

    /// The saving form observing `path`, if any. The lifecycle layer
    /// rejects overlapping saves, so at most one form can match.
    #[must_use]
    pub fn saving_form_observing(&self, path: &EntityPath) -> Option<&Form> {
        self.forms
            .values()
            .find(|form| form.saving() && form.observes(path))
    }

    /// Another form, already saving, that shares an observed entity path
    /// with `form_key`. Used to refuse a second save over the same data.
    #[must_use]
    pub fn saving_overlap(&self, form_key: &FormKey) -> Option<&Form> {
        let form = self.forms.get(form_key)?;
        self.forms.values().find(|other| {
            other.form_key() != form_key
                && other.saving()
                && form.entity_paths().iter().any(|p| other.observes(p))
        })
    }

    fn form_mut(&mut self, form_key: &FormKey) -> RegistryResult<&mut Form> {
        self.forms
            .get_mut(form_key)
            .ok_or_else(|| RegistryError::UnknownForm(form_key.clone()))
    }
}
