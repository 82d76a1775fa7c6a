//! Core type definitions for Formwork.
//!
//! This crate defines the fundamental, host-agnostic vocabulary used
//! throughout the form engine:
//! - Form and entity-path addresses
//! - Field records with their dataset/raw-input value facets
//! - Commands consumed by the engine and events it produces
//!
//! Anything rendering- or transport-specific (how fields are painted, how
//! load/save calls reach a backend) belongs to the host, not here.

mod command;
mod event;
mod field;
mod ids;
mod status;

pub use command::{FormCommand, HostAction};
pub use event::FormEvent;
pub use field::{Field, FieldError, FieldKey, FieldPatch};
pub use ids::{EntityPath, FormKey};
pub use status::TransportStatus;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid form key: {0:?}")]
    InvalidFormKey(String),

    #[error("invalid entity path: {0:?}")]
    InvalidEntityPath(String),
}
