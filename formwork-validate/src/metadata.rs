//! Definitions and domains: the validation metadata registries.
//!
//! Definitions bind a field (by entity path and name) to a domain and say
//! whether it is required. Domains carry the actual rules, shared by every
//! field that points at them, plus an optional display formatter. Both
//! registries load from JSON, so hosts can ship metadata as configuration.

use crate::ValidatorSpec;
use formwork_types::EntityPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Renders a committed value for display in consulting mode.
pub type Formatter = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Binding of one field to a validation domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Key into the domains registry.
    pub domain: String,

    /// Checked before the domain rules run: a required field with a
    /// missing value fails without consulting the domain.
    #[serde(default, rename = "isRequired")]
    pub is_required: bool,
}

impl FieldDefinition {
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            is_required: false,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }
}

/// A validation domain: an ordered rule list shared by every field bound
/// to it, plus an optional display formatter.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Domain {
    /// Rules, applied in order; the first failure wins.
    #[serde(default, rename = "validator")]
    pub validators: Vec<ValidatorSpec>,

    /// Optional rendering hook. Not part of the wire format.
    #[serde(skip)]
    pub formatter: Option<Formatter>,
}

impl Domain {
    #[must_use]
    pub fn new(validators: Vec<ValidatorSpec>) -> Self {
        Self {
            validators,
            formatter: None,
        }
    }

    /// Attaches a display formatter.
    #[must_use]
    pub fn with_formatter(
        mut self,
        formatter: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Renders a value for display: the formatter when one is attached,
    /// otherwise strings as-is and anything else as compact JSON.
    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        if let Some(formatter) = &self.formatter {
            return formatter(value);
        }
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("validators", &self.validators)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// The definitions and domains registries, looked up together at
/// validation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataRegistry {
    /// Entity path, then field name, to definition.
    #[serde(default)]
    definitions: HashMap<EntityPath, HashMap<String, FieldDefinition>>,

    /// Domain key to domain.
    #[serde(default)]
    domains: HashMap<String, Domain>,
}

impl MetadataRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one field definition.
    #[must_use]
    pub fn with_definition(
        mut self,
        path: EntityPath,
        name: impl Into<String>,
        definition: FieldDefinition,
    ) -> Self {
        self.definitions
            .entry(path)
            .or_default()
            .insert(name.into(), definition);
        self
    }

    /// Registers one domain.
    #[must_use]
    pub fn with_domain(mut self, key: impl Into<String>, domain: Domain) -> Self {
        self.domains.insert(key.into(), domain);
        self
    }

    /// Looks up the definition of a field.
    #[must_use]
    pub fn definition(&self, path: &EntityPath, name: &str) -> Option<&FieldDefinition> {
        self.definitions.get(path).and_then(|fields| fields.get(name))
    }

    /// Looks up a domain.
    #[must_use]
    pub fn domain(&self, key: &str) -> Option<&Domain> {
        self.domains.get(key)
    }

    /// Renders a field's value with its domain formatter, falling back to
    /// the default rendering when the field has no domain.
    #[must_use]
    pub fn format_value(&self, path: &EntityPath, name: &str, value: &Value) -> String {
        let domain = self
            .definition(path, name)
            .and_then(|def| self.domain(&def.domain));
        match domain {
            Some(domain) => domain.format(value),
            None => Domain::default().format(value),
        }
    }
}
