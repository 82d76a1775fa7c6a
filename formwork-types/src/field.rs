//! Field records: the unit of reconciliation between forms and the dataset.
//!
//! A field tracks two value facets side by side. `data_set_value` is the
//! last value read from the host's dataset; `raw_input_value` is what the
//! user is editing. They drift apart while a form is in editing mode and
//! are reconciled by the sync protocol on commit or cancel.

use crate::{EntityPath, FormKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Ordering key of a field within a form.
///
/// Field names are unique per entity path, so the pair addresses exactly
/// one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldKey {
    pub entity_path: EntityPath,
    pub name: String,
}

impl FieldKey {
    #[must_use]
    pub fn new(entity_path: EntityPath, name: impl Into<String>) -> Self {
        Self {
            entity_path,
            name: name.into(),
        }
    }
}

/// One bound input of a form.
///
/// The flags mirror the dataset entity the field belongs to, so a renderer
/// can grey out inputs while that entity is loading or saving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, unique within `entity_path`.
    pub name: String,

    /// The dataset entity this field is bound to.
    pub entity_path: EntityPath,

    /// Last value read from the dataset.
    pub data_set_value: Value,

    /// Value under edit. `None` until the field has been refreshed by a
    /// successful dataset change or touched by the user; record-merges
    /// leave an existing raw input alone when this side is `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_input_value: Option<Value>,

    /// Mirrored from the dataset entity.
    #[serde(default)]
    pub loading: bool,

    /// Mirrored from the dataset entity.
    #[serde(default)]
    pub saving: bool,
}

impl Field {
    /// Creates a field snapshotted from a committed dataset value: both
    /// facets start out equal.
    #[must_use]
    pub fn new(entity_path: EntityPath, name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            entity_path,
            raw_input_value: Some(value.clone()),
            data_set_value: value,
            loading: false,
            saving: false,
        }
    }

    /// The default template used when a field is materialized lazily,
    /// before any dataset value has been seen for it: null dataset value,
    /// no raw input, flags cleared.
    #[must_use]
    pub fn template(entity_path: EntityPath, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_path,
            data_set_value: Value::Null,
            raw_input_value: None,
            loading: false,
            saving: false,
        }
    }

    /// Returns this field's ordering key.
    #[must_use]
    pub fn key(&self) -> FieldKey {
        FieldKey::new(self.entity_path.clone(), self.name.clone())
    }

    /// Applies a partial update; absent facets are left untouched.
    pub fn apply_patch(&mut self, patch: &FieldPatch) {
        if let Some(value) = &patch.data_set_value {
            self.data_set_value = value.clone();
        }
        if let Some(value) = &patch.raw_input_value {
            self.raw_input_value = Some(value.clone());
        }
        if let Some(loading) = patch.loading {
            self.loading = loading;
        }
        if let Some(saving) = patch.saving {
            self.saving = saving;
        }
    }

    /// Merges a record rebuilt from the dataset into this field.
    ///
    /// Dataset value and flags are always taken from the record; the raw
    /// input is replaced only when the record carries one (i.e. the change
    /// that produced it was committed).
    pub fn merge_record(&mut self, record: &Field) {
        self.data_set_value = record.data_set_value.clone();
        self.loading = record.loading;
        self.saving = record.saving;
        if let Some(raw) = &record.raw_input_value {
            self.raw_input_value = Some(raw.clone());
        }
    }
}

/// Partial update to a field. Facets left as `None` are untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_set_value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_input_value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saving: Option<bool>,
}

impl FieldPatch {
    /// Patch carrying only a new raw input value (the common case: the
    /// user typed something).
    #[must_use]
    pub fn raw_input(value: Value) -> Self {
        Self {
            raw_input_value: Some(value),
            ..Self::default()
        }
    }

    /// Patch carrying only a new dataset value.
    #[must_use]
    pub fn data_set(value: Value) -> Self {
        Self {
            data_set_value: Some(value),
            ..Self::default()
        }
    }
}

/// Validation failure notification for a single field.
///
/// Emitted alongside the boolean validation result; hosts surface these
/// next to the offending input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub form_key: FormKey,
    pub entity_path: EntityPath,
    pub name: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}.{}: {}",
            self.form_key, self.entity_path, self.name, self.message
        )
    }
}
