//! decorate Intercept - pre-call and post-call interceptors
//!
//! This crate wraps target functions so that registered observers are told
//! about every call:
//!
//! - [`PreCall`]: Observers run before the target; an observer error aborts the call
//! - [`PostCall`]: Observers run after the target and may see its result
//! - [`Observers`]: The ordered observer list shared by an interceptor
//! - [`InterceptConfig`]: The `pass_inputs` / `pass_func` / `pass_output` flags
//!
//! Wrappers keep the target's name, module and signature, and observers that
//! receive the function see the original target.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use decorate_core::{CallArgs, Function, Signature, Value};
//! use decorate_intercept::{CollectingObserver, Observers, PostCall};
//!
//! let target = Function::new("answer", Signature::empty(), |_| Ok(Value::Int(42)));
//! let collector = Arc::new(CollectingObserver::new(16));
//!
//! let wrapped = PostCall::new(Observers::none().with_shared(Arc::clone(&collector)))
//!     .pass_output(true)
//!     .wrap(&target);
//!
//! assert_eq!(wrapped.call(&CallArgs::new())?, Value::Int(42));
//! assert_eq!(collector.last(), Some(CallArgs::new().arg(42)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod observer;
pub mod postcall;
pub mod precall;

pub use config::InterceptConfig;
pub use error::{InterceptError, InterceptResult};
pub use observer::{CollectingObserver, LoggingObserver, Observer, Observers};
pub use postcall::PostCall;
pub use precall::PreCall;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::InterceptConfig;
    pub use crate::error::{InterceptError, InterceptResult};
    pub use crate::observer::{Observer, Observers};
    pub use crate::postcall::PostCall;
    pub use crate::precall::PreCall;
}
