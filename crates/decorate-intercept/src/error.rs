//! Error types for interceptor construction.

use thiserror::Error;

/// Errors while constructing an interceptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterceptError {
    /// The observer argument was not a function, a list of functions, or none.
    #[error("Observers must be a function, a list of functions, or none. Received '{received}'")]
    InvalidObservers {
        /// Description of what was received.
        received: String,
    },
}

/// Result type for interceptor construction.
pub type InterceptResult<T> = std::result::Result<T, InterceptError>;
