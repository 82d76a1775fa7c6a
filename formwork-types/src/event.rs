//! Events produced by the form engine.
//!
//! Events report what the engine did beyond the command it was handed:
//! sync fan-outs, save requests, validation failures, mode flips it
//! initiated itself. Transitions that merely apply a host command are not
//! echoed; the host already knows it sent them.

use crate::{EntityPath, Field, FieldError, FormKey, HostAction};
use serde::{Deserialize, Serialize};

/// A state change or request emitted while applying a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "data", rename_all = "snake_case")]
pub enum FormEvent {
    /// Field records rebuilt from the dataset were merged into every form
    /// observing `entity_path`. `fields` is empty when the dataset holds
    /// no entity at the path.
    EntitySynced {
        entity_path: EntityPath,
        fields: Vec<Field>,
    },

    /// A form passed validation; its save is now in flight.
    SavingStarted { form_key: FormKey },

    /// The engine flipped a form's editing mode on its own, at the
    /// commit edge of a save round-trip.
    EditingToggled { form_key: FormKey, edit: bool },

    /// The host-configured save action, replayed after validation passed.
    /// The host executes it and reports completion as a
    /// `DatasetChanged` command.
    SaveRequested {
        form_key: FormKey,
        action: HostAction,
    },

    /// A field failed validation. Save-gating validation emits one per
    /// failing field; blur feedback emits at most one.
    FieldInvalid(FieldError),
}

impl FormEvent {
    /// The form this event concerns, if any.
    #[must_use]
    pub fn form_key(&self) -> Option<&FormKey> {
        match self {
            Self::EntitySynced { .. } => None,
            Self::SavingStarted { form_key }
            | Self::EditingToggled { form_key, .. }
            | Self::SaveRequested { form_key, .. } => Some(form_key),
            Self::FieldInvalid(error) => Some(&error.form_key),
        }
    }
}
