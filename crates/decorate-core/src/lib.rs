//! decorate Core - values, signatures and target functions
//!
//! This crate provides the data model shared by the rest of the decorate
//! call-interception framework:
//!
//! - [`Value`]: Dynamically typed argument and return values
//! - [`CallArgs`]: The generic call shape (positional list plus keyword map)
//! - [`Signature`]: Declared parameters with kinds and defaults
//! - [`reflect`]: Default-value reflection over a signature
//! - [`Function`]: A named, shareable callable with a signature
//!
//! # Quick Start
//!
//! ```
//! use decorate_core::prelude::*;
//!
//! let signature = Signature::builder()
//!     .positional("name")
//!     .positional_with_default("punctuation", "!")
//!     .build()?;
//!
//! let bind_signature = signature.clone();
//! let greet = Function::new("greet", signature, move |args| {
//!     let bound = bind_signature.bind("greet", args)?;
//!     Ok(Value::from(format!("Hello, {}{}", bound.str("name")?, bound.str("punctuation")?)))
//! });
//!
//! let result = greet.call(&CallArgs::new().arg("World"))?;
//! assert_eq!(result, Value::from("Hello, World!"));
//! assert_eq!(greet.defaults()["punctuation"], Value::from("!"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Ownership
//!
//! Scalars, lists and maps are owned by each [`Value`]. Functions and
//! [`Value::Object`] payloads are shared handles: forwarding them through a
//! wrapper never copies the referent, and equality on them is identity.

pub mod args;
pub mod error;
pub mod function;
pub mod reflect;
pub mod signature;
pub mod value;

// Re-export main types at crate root
pub use args::CallArgs;
pub use error::{
    BindError, BindResult, CallError, CallResult, SignatureError, SignatureResult,
};
pub use function::{Function, FunctionBuilder};
pub use reflect::DefaultMap;
pub use signature::{BoundArgs, Parameter, ParameterKind, Signature, SignatureBuilder};
pub use value::{SharedObject, Value, ValueMap};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::args::CallArgs;
    pub use crate::error::{CallError, CallResult};
    pub use crate::function::Function;
    pub use crate::reflect::DefaultMap;
    pub use crate::signature::{Parameter, ParameterKind, Signature};
    pub use crate::value::{Value, ValueMap};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_end_to_end() {
        let signature = Signature::builder()
            .positional("a")
            .positional_with_default("b", 10)
            .build()
            .unwrap();
        let bind_signature = signature.clone();

        let add = Function::new("add", signature, move |args| {
            let bound = bind_signature.bind("add", args)?;
            Ok(Value::Int(bound.int("a")? + bound.int("b")?))
        });

        assert_eq!(add.call(&CallArgs::new().arg(1)).unwrap(), Value::Int(11));
        assert_eq!(
            add.call(&CallArgs::new().arg(1).kwarg("b", 2)).unwrap(),
            Value::Int(3)
        );
        assert_eq!(add.defaults().len(), 1);
    }
}
