//! # decorate - Call Interception for Rust
//!
//! decorate attaches observers to a function without touching the function
//! itself. Observers run before or after each call and receive a view of the
//! call assembled from flags you choose.
//!
//! ## Features
//!
//! - **Pre-call observers**: Inspect or veto a call before it happens
//! - **Post-call observers**: See the result after the target returns
//! - **Composed arguments**: Forward call inputs, declared defaults, the target itself, and its result
//! - **Debug logging**: Timestamped `[CALL]` / `[RETURN]` lines through `tracing`
//!
//! ## Quick Start
//!
//! ```
//! use decorate::prelude::*;
//!
//! let signature = Signature::builder()
//!     .positional("a")
//!     .positional_with_default("b", 0)
//!     .build()?;
//! let bind_signature = signature.clone();
//! let add = Function::new("add", signature, move |args| {
//!     let bound = bind_signature.bind("add", args)?;
//!     Ok(Value::Int(bound.int("a")? + bound.int("b")?))
//! });
//!
//! let audit = Arc::new(CollectingObserver::new(64));
//! let add = decorate::postcall(Observers::none().with_shared(Arc::clone(&audit)))
//!     .pass_inputs(true)
//!     .pass_output(true)
//!     .wrap(&add);
//!
//! assert_eq!(add.call(&CallArgs::new().arg(2))?, Value::Int(2));
//!
//! let seen = audit.last().unwrap();
//! assert_eq!(seen.positional, vec![Value::Int(2), Value::Int(2)]);
//! assert_eq!(seen.keyword["b"], Value::Int(0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Your Application                     │
//! ├──────────────────────────────────────────────────────────┤
//! │                    decorate (facade)                     │
//! │  ┌──────────────────┬─────────────────┬────────────────┐ │
//! │  │ decorate-        │ decorate-       │ decorate-      │ │
//! │  │ intercept        │ debug           │ compose        │ │
//! │  │ (PreCall,        │ (CALL/RETURN    │ (ArgComposer,  │ │
//! │  │  PostCall)       │  lines)         │  steps)        │ │
//! │  └──────────────────┴─────────────────┴────────────────┘ │
//! ├──────────────────────────────────────────────────────────┤
//! │        decorate-core (Value, Signature, Function)        │
//! └──────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use tracing::debug;

use decorate_core::Value;
use decorate_intercept::{Observers, PostCall, PreCall};

// Re-export from sub-crates
pub use decorate_compose;
pub use decorate_core;
pub use decorate_debug;
pub use decorate_intercept;

/// Create a pre-call interceptor.
pub fn precall(observers: impl Into<Observers>) -> PreCall {
    PreCall::new(observers)
}

/// Create a post-call interceptor.
pub fn postcall(observers: impl Into<Observers>) -> PostCall {
    PostCall::new(observers)
}

/// Create a pre-call interceptor from a dynamic observer value.
///
/// # Errors
///
/// Fails unless `observers` is `None`, a function, or a list of functions.
pub fn precall_from_value(observers: Value) -> Result<PreCall, DecorateError> {
    let observers = Observers::try_from_value(observers)?;
    debug!(observers = observers.len(), "Created pre-call interceptor");
    Ok(PreCall::new(observers))
}

/// Create a post-call interceptor from a dynamic observer value.
///
/// # Errors
///
/// Fails unless `observers` is `None`, a function, or a list of functions.
pub fn postcall_from_value(observers: Value) -> Result<PostCall, DecorateError> {
    let observers = Observers::try_from_value(observers)?;
    debug!(observers = observers.len(), "Created post-call interceptor");
    Ok(PostCall::new(observers))
}

/// Errors from decorate operations.
#[derive(Debug, Error)]
pub enum DecorateError {
    /// Signature error.
    #[error("Signature error: {0}")]
    Signature(#[from] decorate_core::SignatureError),

    /// Call error.
    #[error("Call error: {0}")]
    Call(#[from] decorate_core::CallError),

    /// Composition error.
    #[error("Composition error: {0}")]
    Compose(#[from] decorate_compose::ComposeError),

    /// Interceptor error.
    #[error("Interceptor error: {0}")]
    Intercept(#[from] decorate_intercept::InterceptError),
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Main entry points
    pub use crate::{DecorateError, postcall, precall};

    // Core types
    pub use decorate_core::{
        CallArgs, CallError, CallResult, DefaultMap, Function, Parameter, ParameterKind,
        Signature, Value, ValueMap,
    };

    // Composition types
    pub use decorate_compose::{ArgComposer, RawStep, Step, StepTag};

    // Interceptor types
    pub use decorate_intercept::{
        CollectingObserver, InterceptConfig, LoggingObserver, Observer, Observers, PostCall,
        PreCall,
    };

    // Debug wrappers
    pub use decorate_debug::{debug, debug_input, debug_output, log_input, log_output};

    // Common std types
    pub use std::sync::Arc;
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::prelude::*;
    use super::*;

    fn collect_fn() -> Function {
        let signature = Signature::builder()
            .positional_with_default("default", "x")
            .var_positional("args")
            .var_keyword("kwargs")
            .build()
            .unwrap();
        Function::new("f", signature, |args| Ok(Value::Int(args.len() as i64)))
    }

    fn answer() -> Function {
        Function::new("answer", Signature::empty(), |_| Ok(Value::Int(42)))
    }

    #[test]
    fn test_forwarded_inputs_merge_defaults() {
        let audit = Arc::new(CollectingObserver::new(8));
        let f = precall(Observers::none().with_shared(Arc::clone(&audit)))
            .pass_inputs(true)
            .wrap(&collect_fn());

        f.call(&CallArgs::new().arg(1).arg(2).kwarg("key", "v")).unwrap();

        let seen = audit.last().unwrap();
        assert_eq!(seen.positional, vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(
            seen.keyword.iter().collect::<Vec<_>>(),
            vec![
                (&"key".to_string(), &Value::from("v")),
                (&"default".to_string(), &Value::from("x")),
            ]
        );
    }

    #[test]
    fn test_forwarded_function_is_first() {
        let target = collect_fn();
        let audit = Arc::new(CollectingObserver::new(8));
        let f = precall(Observers::none().with_shared(Arc::clone(&audit)))
            .pass_inputs(true)
            .pass_func(true)
            .wrap(&target);

        f.call(&CallArgs::new().arg(1)).unwrap();

        let seen = audit.last().unwrap();
        let first = seen.positional[0].as_function().unwrap();
        assert!(first.ptr_eq(&target));
        assert_eq!(first.name(), "f");
        assert_eq!(seen.positional[1], Value::Int(1));
    }

    #[test]
    fn test_forwarded_output_is_last() {
        let audit = Arc::new(CollectingObserver::new(8));
        let f = postcall(Observers::none().with_shared(Arc::clone(&audit)))
            .pass_output(true)
            .wrap(&answer());

        assert_eq!(f.call(&CallArgs::new()).unwrap(), Value::Int(42));
        assert_eq!(audit.last().unwrap().last(), Some(&Value::Int(42)));
    }

    #[test]
    fn test_raising_observer_blocks_target() {
        let counter = Arc::new(Mutex::new(0));
        let marker = Arc::clone(&counter);
        let target = Function::new("touch", Signature::empty(), move |_| {
            *marker.lock() += 1;
            Ok(Value::None)
        });

        let f = precall(Observers::none().with_fn(|_| Err(CallError::failed("guard", "raised"))))
            .wrap(&target);

        assert!(f.call(&CallArgs::new()).is_err());
        assert_eq!(*counter.lock(), 0);
    }

    #[test]
    fn test_registration_order() {
        let sequence = Arc::new(Mutex::new(Vec::new()));
        let mut observers = Observers::none();
        for id in 0..3 {
            let sequence = Arc::clone(&sequence);
            observers = observers.with_fn(move |_| {
                sequence.lock().push(id);
                Ok(())
            });
        }

        let pre = precall(observers.clone()).wrap(&answer());
        let post = postcall(observers).wrap(&answer());
        pre.call(&CallArgs::new()).unwrap();
        post.call(&CallArgs::new()).unwrap();

        assert_eq!(*sequence.lock(), vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_no_observers_is_transparent() {
        let target = collect_fn();
        let pre = precall(Observers::none()).pass_inputs(true).wrap(&target);
        let post = postcall(Observers::none()).pass_output(true).wrap(&target);
        let args = CallArgs::new().arg(1).kwarg("key", "v");

        let expected = target.call(&args).unwrap();
        assert_eq!(pre.call(&args).unwrap(), expected);
        assert_eq!(post.call(&args).unwrap(), expected);

        let failing = Function::new("fail", Signature::empty(), |_| {
            Err(CallError::failed("fail", "boom"))
        });
        let expected = failing.call(&CallArgs::new()).unwrap_err();
        let pre = precall(Observers::none()).wrap(&failing);
        let post = postcall(Observers::none()).wrap(&failing);
        assert_eq!(pre.call(&CallArgs::new()).unwrap_err(), expected);
        assert_eq!(post.call(&CallArgs::new()).unwrap_err(), expected);
    }

    #[test]
    fn test_from_value() {
        let observer = Function::new("seen", Signature::variadic(), |_| Ok(Value::None));
        let pre = precall_from_value(Value::List(vec![Value::Function(observer)])).unwrap();
        assert_eq!(pre.observers().len(), 1);

        let err = postcall_from_value(Value::from("not a function")).unwrap_err();
        assert!(matches!(err, DecorateError::Intercept(_)));
    }

    #[test]
    fn test_debug_around_interceptor() {
        let audit = Arc::new(CollectingObserver::new(8));
        let target = answer();
        let observed = postcall(Observers::none().with_shared(Arc::clone(&audit)))
            .pass_func(true)
            .wrap(&target);
        let logged = debug(&observed);

        assert_eq!(logged.call(&CallArgs::new()).unwrap(), Value::Int(42));
        assert_eq!(logged.name(), "answer");
        assert!(logged.innermost().ptr_eq(&target));
        assert_eq!(audit.len(), 1);
    }
}
