//! Commands consumed by the form engine.
//!
//! Commands are the only way state changes: hosts queue them on the
//! dispatch bus and a single writer applies them in order. Each carries
//! everything needed to perform its transition, so replicas of the
//! registry driven by the same command sequence end up identical.

use crate::{EntityPath, FormKey, TransportStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque host-supplied action payload.
///
/// The engine never inspects it; a save action is held through validation
/// and replayed verbatim in `FormEvent::SaveRequested` once the form
/// validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostAction(pub Value);

impl HostAction {
    /// Returns the wrapped payload.
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for HostAction {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A state transition request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "data", rename_all = "snake_case")]
pub enum FormCommand {
    /// Register a form observing `entity_paths`, snapshotting one field
    /// per dataset value currently present at those paths.
    Create {
        form_key: FormKey,
        entity_paths: Vec<EntityPath>,
    },

    /// Drop a form and every field it owns.
    Destroy { form_key: FormKey },

    /// Enter (`edit = true`) or leave editing mode. Leaving restores every
    /// raw input from its dataset value, discarding unsaved edits.
    ToggleEditing { form_key: FormKey, edit: bool },

    /// Patch a field's raw input while editing. The field is materialized
    /// from the default template if it does not exist yet.
    InputChange {
        form_key: FormKey,
        entity_path: EntityPath,
        name: String,
        value: Value,
    },

    /// Like `InputChange`, additionally running the field's validators as
    /// immediate feedback.
    InputBlur {
        form_key: FormKey,
        entity_path: EntityPath,
        name: String,
        value: Value,
    },

    /// Blur for one line of a list-valued field: writes `value` into
    /// `raw_input_value[index][property_name_line]`.
    InputBlurList {
        form_key: FormKey,
        entity_path: EntityPath,
        name: String,
        property_name_line: String,
        index: usize,
        value: Value,
    },

    /// Validate every field not named in `non_validated_fields`; when all
    /// of them pass, mark the form saving and request the save action.
    Validate {
        form_key: FormKey,
        #[serde(default)]
        non_validated_fields: Vec<String>,
        save_action: HostAction,
    },

    /// Restore every raw input of the form from its dataset value.
    Reset { form_key: FormKey },

    /// The dataset changed at `entity_path`: rebuild field records and
    /// reconcile every form observing the path. `saving` is true when the
    /// change was produced by a save round-trip.
    DatasetChanged {
        entity_path: EntityPath,
        status: TransportStatus,
        saving: bool,
    },
}

impl FormCommand {
    /// The form this command addresses, if it addresses one.
    /// `DatasetChanged` fans out by entity path instead.
    #[must_use]
    pub fn form_key(&self) -> Option<&FormKey> {
        match self {
            Self::Create { form_key, .. }
            | Self::Destroy { form_key }
            | Self::ToggleEditing { form_key, .. }
            | Self::InputChange { form_key, .. }
            | Self::InputBlur { form_key, .. }
            | Self::InputBlurList { form_key, .. }
            | Self::Validate { form_key, .. }
            | Self::Reset { form_key } => Some(form_key),
            Self::DatasetChanged { .. } => None,
        }
    }
}
