//! Error types for argument composition.

use thiserror::Error;

/// Errors while decoding a configuration sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// A step tag outside the supported set.
    #[error("Unknown configuration step tag: {0}")]
    UnknownStep(u8),

    /// A step name outside the supported set.
    #[error("Unknown configuration step: '{0}'")]
    UnknownStepName(String),

    /// A step that needs a payload was given none.
    #[error("Configuration step '{0}' requires a payload")]
    MissingPayload(&'static str),

    /// A step that takes no payload was given one.
    #[error("Configuration step '{0}' does not take a payload")]
    UnexpectedPayload(&'static str),
}

/// Result type for composition operations.
pub type ComposeResult<T> = std::result::Result<T, ComposeError>;
