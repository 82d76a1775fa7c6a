//! Read-only view of the host's normalized dataset.
//!
//! The dataset is owned elsewhere (store, cache, whatever the host runs).
//! The engine only ever reads it, through this seam, at the moment it
//! applies a command; it never holds a reference across transitions.

use formwork_types::EntityPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// One entity as the dataset holds it: committed values plus the
/// in-flight flags of the operation touching it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Committed field values, keyed by field name.
    #[serde(default)]
    pub data: BTreeMap<String, Value>,

    #[serde(default)]
    pub loading: bool,

    #[serde(default)]
    pub saving: bool,
}

impl EntityRecord {
    #[must_use]
    pub fn new(data: BTreeMap<String, Value>) -> Self {
        Self {
            data,
            loading: false,
            saving: false,
        }
    }

    /// Chainable value setter, handy when building records by hand.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.data.insert(name.into(), value);
        self
    }
}

/// Read access to the dataset.
pub trait DatasetView {
    /// Returns the entity at `path`, if the dataset holds one.
    fn entity(&self, path: &EntityPath) -> Option<EntityRecord>;
}

/// HashMap-backed dataset for hosts without a store of their own, and
/// for tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDataset {
    entities: HashMap<EntityPath, EntityRecord>,
}

impl MemoryDataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entity at `path`.
    pub fn insert(&mut self, path: EntityPath, record: EntityRecord) {
        self.entities.insert(path, record);
    }

    /// Sets one value of the entity at `path`, creating the entity if
    /// needed.
    pub fn set_value(&mut self, path: &EntityPath, name: impl Into<String>, value: Value) {
        self.entities
            .entry(path.clone())
            .or_default()
            .data
            .insert(name.into(), value);
    }

    /// Flags the entity at `path` as loading, creating it if needed.
    pub fn set_loading(&mut self, path: &EntityPath, loading: bool) {
        self.entities.entry(path.clone()).or_default().loading = loading;
    }

    /// Flags the entity at `path` as saving, creating it if needed.
    pub fn set_saving(&mut self, path: &EntityPath, saving: bool) {
        self.entities.entry(path.clone()).or_default().saving = saving;
    }

    /// Removes the entity at `path`.
    pub fn remove(&mut self, path: &EntityPath) -> Option<EntityRecord> {
        self.entities.remove(path)
    }
}

impl DatasetView for MemoryDataset {
    fn entity(&self, path: &EntityPath) -> Option<EntityRecord> {
        self.entities.get(path).cloned()
    }
}
