//! The form aggregate.
//!
//! A form owns one field per (entity path, name) pair across every entity
//! path it observes, plus two mode flags: `edit` (the user is changing
//! things) and `saving` (a validated save is in flight). All mutation goes
//! through the registry; everything public here is a read-only projection.

use formwork_types::{EntityPath, Field, FieldKey, FieldPatch, FormKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A registered form and the fields it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    form_key: FormKey,
    entity_paths: Vec<EntityPath>,
    #[serde(with = "fields_as_records")]
    fields: BTreeMap<FieldKey, Field>,
    edit: bool,
    saving: bool,
}

impl Form {
    pub(crate) fn new(form_key: FormKey, entity_paths: Vec<EntityPath>, fields: Vec<Field>) -> Self {
        let fields = fields.into_iter().map(|f| (f.key(), f)).collect();
        Self {
            form_key,
            entity_paths,
            fields,
            edit: false,
            saving: false,
        }
    }

    /// The key this form is registered under.
    #[must_use]
    pub fn form_key(&self) -> &FormKey {
        &self.form_key
    }

    /// The entity paths this form observes.
    #[must_use]
    pub fn entity_paths(&self) -> &[EntityPath] {
        &self.entity_paths
    }

    /// True when `path` is one of the observed entity paths.
    #[must_use]
    pub fn observes(&self, path: &EntityPath) -> bool {
        self.entity_paths.contains(path)
    }

    /// True while the user is editing.
    #[must_use]
    pub fn edit(&self) -> bool {
        self.edit
    }

    /// True between a successful validation and the save completing.
    #[must_use]
    pub fn saving(&self) -> bool {
        self.saving
    }

    /// Looks up a single field.
    #[must_use]
    pub fn field(&self, path: &EntityPath, name: &str) -> Option<&Field> {
        self.fields
            .get(&FieldKey::new(path.clone(), name.to_string()))
    }

    /// All fields, ordered by (entity path, name).
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Collects the raw input of every touched field, grouped by entity
    /// path: the shape a host feeds into its save call. Fields that were
    /// never synchronized or edited are absent.
    #[must_use]
    pub fn user_input(&self) -> BTreeMap<EntityPath, BTreeMap<String, Value>> {
        let mut out: BTreeMap<EntityPath, BTreeMap<String, Value>> = BTreeMap::new();
        for field in self.fields.values() {
            if let Some(raw) = &field.raw_input_value {
                out.entry(field.entity_path.clone())
                    .or_default()
                    .insert(field.name.clone(), raw.clone());
            }
        }
        out
    }

    pub(crate) fn set_edit(&mut self, edit: bool) {
        self.edit = edit;
    }

    pub(crate) fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    /// Applies a patch to the addressed field, materializing it from the
    /// default template first when it does not exist yet.
    pub(crate) fn upsert_field(&mut self, path: &EntityPath, name: &str, patch: &FieldPatch) {
        let key = FieldKey::new(path.clone(), name.to_string());
        let field = self
            .fields
            .entry(key)
            .or_insert_with(|| Field::template(path.clone(), name.to_string()));
        field.apply_patch(patch);
    }

    /// Writes `value` into `raw_input_value[index][property]` of a
    /// list-valued field. Returns false when there is nothing to patch:
    /// no such field, raw input is not an array, the index is out of
    /// bounds, or the line is not an object.
    pub(crate) fn patch_list_line(
        &mut self,
        path: &EntityPath,
        name: &str,
        property: &str,
        index: usize,
        value: Value,
    ) -> bool {
        let key = FieldKey::new(path.clone(), name.to_string());
        let field = match self.fields.get_mut(&key) {
            Some(field) => field,
            None => return false,
        };
        let lines = match field.raw_input_value.as_mut() {
            Some(Value::Array(lines)) => lines,
            _ => return false,
        };
        let line = match lines.get_mut(index) {
            Some(Value::Object(line)) => line,
            _ => return false,
        };
        line.insert(property.to_string(), value);
        true
    }

    /// Merges dataset records into this form: existing fields are
    /// record-merged, unknown ones inserted as-is. Merging the same batch
    /// twice is a no-op.
    pub(crate) fn merge_records(&mut self, records: &[Field]) {
        for record in records {
            match self.fields.get_mut(&record.key()) {
                Some(field) => field.merge_record(record),
                None => {
                    self.fields.insert(record.key(), record.clone());
                }
            }
        }
    }

    /// Restores every raw input from its dataset value, discarding
    /// unsaved edits. Flags are untouched.
    pub(crate) fn reset_inputs(&mut self) {
        for field in self.fields.values_mut() {
            field.raw_input_value = Some(field.data_set_value.clone());
        }
    }
}

/// Fields travel as a flat record list on the wire; the ordering key is
/// recomputed on the way back in.
mod fields_as_records {
    use super::{BTreeMap, Field, FieldKey};
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        fields: &BTreeMap<FieldKey, Field>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(fields.len()))?;
        for field in fields.values() {
            seq.serialize_element(field)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<FieldKey, Field>, D::Error> {
        let records = Vec::<Field>::deserialize(deserializer)?;
        Ok(records.into_iter().map(|f| (f.key(), f)).collect())
    }
}
