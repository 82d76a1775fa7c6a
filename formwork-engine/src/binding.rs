//! Host-facing adapter: validated form options and command builders.
//!
//! Hosts declare a form once as `FormOptions` (typically deserialized
//! from configuration) and connect it into a `FormBinding`. Connecting
//! validates the declaration fail-fast; afterwards the binding turns UI
//! callbacks into ready-to-dispatch command sequences.

use crate::error::{ConfigError, ConfigResult};
use formwork_types::{EntityPath, FormCommand, FormKey, HostAction};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Form wiring as hosts declare it. Nothing here is trusted until
/// `FormBinding::connect` validates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    #[serde(default)]
    pub form_key: String,

    /// Entity paths the form observes. At least one is required.
    #[serde(default)]
    pub entity_paths: Vec<String>,

    /// Field names skipped by form-level validation.
    #[serde(default)]
    pub non_validated_fields: Vec<String>,

    /// Opaque action the host runs to load the observed entities.
    #[serde(default)]
    pub load_action: Option<HostAction>,

    /// Opaque action requested once the form validates.
    #[serde(default)]
    pub save_action: Option<HostAction>,
}

/// A validated form declaration translating host interactions into
/// commands.
#[derive(Debug, Clone)]
pub struct FormBinding {
    form_key: FormKey,
    entity_paths: Vec<EntityPath>,
    non_validated_fields: Vec<String>,
    load_action: Option<HostAction>,
    save_action: Option<HostAction>,
}

impl FormBinding {
    /// Validates `options`, failing fast on a malformed declaration.
    pub fn connect(options: FormOptions) -> ConfigResult<Self> {
        let form_key = FormKey::new(options.form_key)?;
        if options.entity_paths.is_empty() {
            return Err(ConfigError::NoEntityPaths(form_key));
        }
        let mut entity_paths = Vec::with_capacity(options.entity_paths.len());
        for path in options.entity_paths {
            entity_paths.push(EntityPath::new(path)?);
        }
        Ok(Self {
            form_key,
            entity_paths,
            non_validated_fields: options.non_validated_fields,
            load_action: options.load_action,
            save_action: options.save_action,
        })
    }

    /// The validated form key.
    #[must_use]
    pub fn form_key(&self) -> &FormKey {
        &self.form_key
    }

    /// The entity paths this form observes.
    #[must_use]
    pub fn entity_paths(&self) -> &[EntityPath] {
        &self.entity_paths
    }

    /// The configured load action, for the host to run on mount. Its
    /// completion comes back as a `DatasetChanged` command.
    #[must_use]
    pub fn load_action(&self) -> Option<&HostAction> {
        self.load_action.as_ref()
    }

    // ── Command builders ─────────────────────────────────────────

    /// Command registering the form.
    #[must_use]
    pub fn mount(&self) -> FormCommand {
        FormCommand::Create {
            form_key: self.form_key.clone(),
            entity_paths: self.entity_paths.clone(),
        }
    }

    /// Command dropping the form and every field it owns.
    #[must_use]
    pub fn unmount(&self) -> FormCommand {
        FormCommand::Destroy {
            form_key: self.form_key.clone(),
        }
    }

    /// Commands flipping editing mode. Leaving edit mode is a
    /// cancellation, so the flip is preceded by a reset discarding
    /// unsaved input.
    #[must_use]
    pub fn toggle_edit(&self, edit: bool) -> Vec<FormCommand> {
        let toggle = FormCommand::ToggleEditing {
            form_key: self.form_key.clone(),
            edit,
        };
        if edit {
            vec![toggle]
        } else {
            vec![
                FormCommand::Reset {
                    form_key: self.form_key.clone(),
                },
                toggle,
            ]
        }
    }

    /// Command patching a field's raw input.
    #[must_use]
    pub fn input_change(
        &self,
        entity_path: EntityPath,
        name: impl Into<String>,
        value: Value,
    ) -> FormCommand {
        FormCommand::InputChange {
            form_key: self.form_key.clone(),
            entity_path,
            name: name.into(),
            value,
        }
    }

    /// Command patching a field's raw input with validation feedback.
    #[must_use]
    pub fn input_blur(
        &self,
        entity_path: EntityPath,
        name: impl Into<String>,
        value: Value,
    ) -> FormCommand {
        FormCommand::InputBlur {
            form_key: self.form_key.clone(),
            entity_path,
            name: name.into(),
            value,
        }
    }

    /// Command patching one property of one line of a list-valued field.
    #[must_use]
    pub fn input_blur_list(
        &self,
        entity_path: EntityPath,
        name: impl Into<String>,
        property_name_line: impl Into<String>,
        index: usize,
        value: Value,
    ) -> FormCommand {
        FormCommand::InputBlurList {
            form_key: self.form_key.clone(),
            entity_path,
            name: name.into(),
            property_name_line: property_name_line.into(),
            index,
            value,
        }
    }

    /// Command running form-level validation and, when every field
    /// passes, requesting the configured save action.
    pub fn save(&self) -> ConfigResult<FormCommand> {
        let action = self
            .save_action
            .clone()
            .ok_or_else(|| ConfigError::MissingSaveAction(self.form_key.clone()))?;
        Ok(FormCommand::Validate {
            form_key: self.form_key.clone(),
            non_validated_fields: self.non_validated_fields.clone(),
            save_action: action,
        })
    }
}
