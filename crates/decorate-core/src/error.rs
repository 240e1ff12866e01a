//! Core error types for decorate.
//!
//! Signature construction, argument binding and function calls each have
//! their own error type. [`CallError`] is what target bodies and observers
//! return; it is propagated unchanged through every wrapper.

use thiserror::Error;

use crate::signature::ParameterKind;

/// Errors while building a signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// Two parameters share a name.
    #[error("Duplicate parameter name: '{0}'")]
    DuplicateParameter(String),

    /// More than one collector of the same variadic kind.
    #[error("Only one {kind} parameter is allowed, found a second one: '{name}'")]
    MultipleVariadic {
        /// The variadic kind.
        kind: ParameterKind,
        /// The offending parameter.
        name: String,
    },

    /// A parameter appears where its kind is not allowed.
    #[error("Parameter '{name}' ({kind}) cannot follow a {after} parameter")]
    InvalidOrder {
        /// The offending parameter.
        name: String,
        /// Its kind.
        kind: ParameterKind,
        /// The kind it was placed after.
        after: ParameterKind,
    },

    /// A variadic collector was given a default value.
    #[error("Variadic parameter '{0}' cannot have a default value")]
    VariadicDefault(String),

    /// A required positional parameter follows one with a default.
    #[error("Non-default parameter '{0}' follows a default parameter")]
    RequiredAfterDefault(String),
}

/// Errors while binding call arguments to a signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A required argument was not supplied.
    #[error("{function}() missing required argument: '{name}'")]
    MissingArgument {
        /// The function name.
        function: String,
        /// The missing parameter.
        name: String,
    },

    /// More positional arguments than positional parameters.
    #[error("{function}() takes {expected} positional arguments but {given} were given")]
    TooManyPositional {
        /// The function name.
        function: String,
        /// Number of positional parameters.
        expected: usize,
        /// Number of positional arguments supplied.
        given: usize,
    },

    /// A keyword argument matches no parameter.
    #[error("{function}() got an unexpected keyword argument '{name}'")]
    UnexpectedKeyword {
        /// The function name.
        function: String,
        /// The keyword.
        name: String,
    },

    /// A parameter received both a positional and a keyword value.
    #[error("{function}() got multiple values for argument '{name}'")]
    MultipleValues {
        /// The function name.
        function: String,
        /// The parameter.
        name: String,
    },

    /// A positional-only parameter was passed by keyword.
    #[error("{function}() got a positional-only argument passed as keyword: '{name}'")]
    PositionalOnlyByKeyword {
        /// The function name.
        function: String,
        /// The parameter.
        name: String,
    },
}

/// Errors raised by a function body or an observer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    /// The arguments did not fit the function's signature.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// An argument had the wrong type.
    #[error("{function}(): argument '{name}' expected {expected}, got {actual}")]
    TypeMismatch {
        /// The function name.
        function: String,
        /// The parameter.
        name: String,
        /// Expected type name.
        expected: &'static str,
        /// Actual type name.
        actual: &'static str,
    },

    /// The function failed.
    #[error("{function} failed: {message}")]
    Failed {
        /// The function or observer that failed.
        function: String,
        /// Failure description.
        message: String,
    },
}

impl CallError {
    /// Create a failure error.
    pub fn failed(function: impl Into<String>, message: impl Into<String>) -> Self {
        CallError::Failed {
            function: function.into(),
            message: message.into(),
        }
    }
}

/// Result type for signature construction.
pub type SignatureResult<T> = std::result::Result<T, SignatureError>;

/// Result type for argument binding.
pub type BindResult<T> = std::result::Result<T, BindError>;

/// Result type for function calls.
pub type CallResult<T> = std::result::Result<T, CallError>;
