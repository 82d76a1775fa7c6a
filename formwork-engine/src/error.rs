//! Error types for the form engine.

use formwork_model::RegistryError;
use formwork_types::FormKey;
use thiserror::Error;

/// Result type for lifecycle transitions.
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Errors from applying a command.
///
/// `FormStore::dispatch` contains every one of these with a `warn!`;
/// they surface only to callers driving the controller directly.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The registry refused the transition.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// At most one in-flight save may observe a given entity path; this
    /// save would overlap one already running.
    #[error("form {form_key} cannot start saving: form {saving_form_key} is saving shared entity data")]
    OverlappingSave {
        form_key: FormKey,
        saving_form_key: FormKey,
    },
}

/// Result type for binding configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Malformed host-supplied form options. Raised while connecting a
/// binding, never at dispatch time.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The form key or one of the entity paths failed text validation.
    #[error(transparent)]
    Invalid(#[from] formwork_types::Error),

    /// A form must observe at least one entity path.
    #[error("form {0} observes no entity paths")]
    NoEntityPaths(FormKey),

    /// A save was built from a binding configured without a save action.
    #[error("form {0} has no configured save action")]
    MissingSaveAction(FormKey),
}

/// Result type for bus operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors from the dispatch bus.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The dispatch worker is gone; the command was not queued.
    #[error("dispatch channel closed")]
    ChannelClosed,

    /// The dispatch worker panicked or was cancelled before handing the
    /// store back.
    #[error("dispatch worker terminated abnormally")]
    WorkerFailed,
}
