//! Form lifecycle engine for Formwork.
//!
//! Ties the vocabulary, model, and validation crates together into a
//! dispatchable engine:
//! - **Controller**: applies commands to the form registry
//! - **Sync**: rebuilds field records from the host dataset
//! - **Store**: owns the registry and contains lifecycle errors at dispatch
//! - **Bus**: single-writer tokio worker for async hosts
//! - **Binding**: validated host-facing command builders
//!
//! # Architecture
//!
//! State changes only through commands, applied one at a time by a single
//! writer. The dataset is never owned here: the engine reads a snapshot
//! through the `DatasetView` seam at the moment it applies a command, and
//! hosts report dataset changes back as `DatasetChanged` commands.
//!
//! ## Save Round-Trip
//!
//! 1. **Validate**: every non-excluded field checks its domain rules
//! 2. **Request**: the form flips to saving and the host-configured save
//!    action is replayed as `SaveRequested`
//! 3. **Commit**: the host persists the data and reports a successful
//!    `DatasetChanged`; raw inputs refresh and the form returns to
//!    consulting mode
//!
//! # Example
//!
//! ```
//! use formwork_engine::{FormBinding, FormOptions, FormStore};
//! use formwork_model::MemoryDataset;
//! use formwork_validate::MetadataRegistry;
//! use std::sync::Arc;
//!
//! let binding = FormBinding::connect(FormOptions {
//!     form_key: "user-profile".to_string(),
//!     entity_paths: vec!["user".to_string()],
//!     ..FormOptions::default()
//! })?;
//!
//! let mut store = FormStore::new(Arc::new(MetadataRegistry::new()));
//! let dataset = MemoryDataset::new();
//! store.dispatch(binding.mount(), &dataset);
//!
//! assert!(store.form(binding.form_key()).is_some());
//! # Ok::<(), formwork_engine::ConfigError>(())
//! ```

mod binding;
pub mod bus;
mod controller;
mod error;
mod store;
mod sync;

pub use binding::{FormBinding, FormOptions};
pub use bus::StoreHandle;
pub use controller::FormController;
pub use error::{
    ConfigError, ConfigResult, ControllerError, ControllerResult, EngineError, EngineResult,
};
pub use store::FormStore;
pub use sync::snapshot_entity_fields;
