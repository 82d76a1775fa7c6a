//! Rebuilding field records from the dataset.
//!
//! A dataset change reaches forms as a list of field records, one per value
//! the dataset holds at the changed path. Whether a record carries a raw
//! input facet depends on the transport status of the change: only a
//! committed change may overwrite what the user typed.

use formwork_model::DatasetView;
use formwork_types::{EntityPath, Field};

/// Builds one field record per value the dataset holds at `path`.
///
/// Records always carry the fresh dataset value and the entity's
/// loading/saving flags. With `refresh_raw` set they carry the dataset
/// value as raw input too, so merging them resets any in-progress edit;
/// without it the raw facet is `None` and merges leave existing raw
/// inputs alone. An absent entity yields no records.
pub fn snapshot_entity_fields(
    dataset: &dyn DatasetView,
    path: &EntityPath,
    refresh_raw: bool,
) -> Vec<Field> {
    let record = match dataset.entity(path) {
        Some(record) => record,
        None => return Vec::new(),
    };

    record
        .data
        .iter()
        .map(|(name, value)| {
            let mut field = Field::new(path.clone(), name.clone(), value.clone());
            if !refresh_raw {
                field.raw_input_value = None;
            }
            field.loading = record.loading;
            field.saving = record.saving;
            field
        })
        .collect()
}
