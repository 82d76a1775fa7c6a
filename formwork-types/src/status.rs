//! Transport status carried by dataset-change commands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of the dataset operation that triggered a change.
///
/// Only `Success` marks a committed value: the sync protocol refreshes
/// raw input exclusively on successful changes, so an in-flight or failed
/// operation can never clobber what the user is typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportStatus {
    /// The operation was issued and has not completed.
    Pending,
    /// The operation committed; dataset values are authoritative.
    Success,
    /// The operation failed; dataset values are unchanged.
    Error,
}

impl TransportStatus {
    /// True for committed changes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}
