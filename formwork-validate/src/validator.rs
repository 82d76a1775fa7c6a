//! Field validation with the dual boolean/notification contract.

use crate::{MetadataRegistry, ValidatorSpec};
use formwork_types::{EntityPath, Field, FieldError, FormKey};
use serde_json::Value;
use tracing::debug;

/// Validates one field's raw value against its definition.
///
/// Two results, independently observable: the returned boolean gates the
/// save transition, and a `FieldError` goes through `emit` for the first
/// failing rule so the host can surface it. Rules run in order (the
/// implicit required check first, then the domain's list) and the first
/// failure short-circuits the rest.
///
/// A field without a definition, or bound to an unknown domain, has no
/// rules and is valid. A raw value that was never synchronized validates
/// as JSON null.
pub fn validate_field(
    metadata: &MetadataRegistry,
    form_key: &FormKey,
    entity_path: &EntityPath,
    name: &str,
    raw_value: Option<&Value>,
    emit: &mut dyn FnMut(FieldError),
) -> bool {
    let definition = match metadata.definition(entity_path, name) {
        Some(definition) => definition,
        None => return true,
    };
    let value = raw_value.unwrap_or(&Value::Null);

    let required = ValidatorSpec::Required;
    let implicit = if definition.is_required {
        Some(&required)
    } else {
        None
    };
    let domain_rules = metadata
        .domain(&definition.domain)
        .map(|domain| domain.validators.as_slice())
        .unwrap_or(&[]);

    for spec in implicit.into_iter().chain(domain_rules) {
        if let Err(message) = spec.check(value) {
            debug!(
                form_key = %form_key,
                entity_path = %entity_path,
                field = %name,
                "validation failed: {message}"
            );
            emit(FieldError {
                form_key: form_key.clone(),
                entity_path: entity_path.clone(),
                name: name.to_string(),
                message,
            });
            return false;
        }
    }
    true
}

/// The fields taking part in form-level validation: everything whose name
/// is not listed in `non_validated_fields`. Exclusion is by name alone,
/// matching how hosts declare the list.
pub fn filter_non_validated_fields<'a>(
    fields: impl Iterator<Item = &'a Field>,
    non_validated_fields: &[String],
) -> Vec<&'a Field> {
    fields
        .filter(|field| !non_validated_fields.iter().any(|name| name == &field.name))
        .collect()
}
