//! Form state model for Formwork.
//!
//! Defines the state slice the engine operates on:
//! - **Form**: a registered form, its observed entity paths, owned fields,
//!   and edit/saving mode flags
//! - **FormRegistry**: holds every form; the only writer of form state
//! - **DatasetView** / **EntityRecord**: the read-only seam to the host's
//!   normalized dataset
//! - **MemoryDataset**: a map-backed dataset for hosts and tests
//!
//! These types are consumed by the engine and, as read-only projections,
//! by whatever renders the forms. They form the contract between the
//! host and the reconciliation core.

mod dataset;
mod form;
mod registry;

pub use dataset::{DatasetView, EntityRecord, MemoryDataset};
pub use form::Form;
pub use registry::{FormRegistry, RegistryError, RegistryResult};
