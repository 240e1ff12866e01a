//! Target functions.
//!
//! A [`Function`] is a named callable with declared parameter metadata and an
//! opaque body. Handles are cheap to clone and compare by identity. Wrappers
//! built with [`Function::wrapping`] keep the target's name, module and
//! signature so that anything reflecting on the wrapper sees the original.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::trace;

use crate::args::CallArgs;
use crate::error::{BindResult, CallResult};
use crate::reflect::{self, DefaultMap};
use crate::signature::{BoundArgs, Signature};
use crate::value::Value;

/// Module reported by functions that do not set one.
pub const DEFAULT_MODULE: &str = "main";

/// The callable body of a function.
pub type FunctionBody = dyn Fn(&CallArgs) -> CallResult<Value> + Send + Sync;

struct FunctionInner {
    name: String,
    module: String,
    signature: Signature,
    body: Box<FunctionBody>,
    wrapped: Option<Function>,
    defaults: OnceLock<DefaultMap>,
}

/// A shared handle to a callable target function.
#[derive(Clone)]
pub struct Function {
    inner: Arc<FunctionInner>,
}

impl Function {
    /// Create a function in the default module.
    pub fn new<F>(name: impl Into<String>, signature: Signature, body: F) -> Self
    where
        F: Fn(&CallArgs) -> CallResult<Value> + Send + Sync + 'static,
    {
        Self::builder(name).with_signature(signature).build(body)
    }

    /// Start building a function.
    pub fn builder(name: impl Into<String>) -> FunctionBuilder {
        FunctionBuilder::new(name)
    }

    /// Create a wrapper around `target` that reports the target's identity.
    pub fn wrapping<F>(target: &Function, body: F) -> Self
    where
        F: Fn(&CallArgs) -> CallResult<Value> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(FunctionInner {
                name: target.inner.name.clone(),
                module: target.inner.module.clone(),
                signature: target.inner.signature.clone(),
                body: Box::new(body),
                wrapped: Some(target.clone()),
                defaults: OnceLock::new(),
            }),
        }
    }

    /// The function name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The module the function belongs to.
    pub fn module(&self) -> &str {
        &self.inner.module
    }

    /// `module::name`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.inner.module, self.inner.name)
    }

    /// The declared signature.
    pub fn signature(&self) -> &Signature {
        &self.inner.signature
    }

    /// Declared default values, computed once per function.
    pub fn defaults(&self) -> &DefaultMap {
        self.inner
            .defaults
            .get_or_init(|| reflect::defaults(&self.inner.signature))
    }

    /// The function this one wraps, if it is a wrapper.
    pub fn wrapped(&self) -> Option<&Function> {
        self.inner.wrapped.as_ref()
    }

    /// Follow the wrapper chain down to the original target.
    pub fn innermost(&self) -> &Function {
        let mut current = self;
        while let Some(next) = current.wrapped() {
            current = next;
        }
        current
    }

    /// Check if two handles refer to the same function.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Bind arguments against this function's signature.
    pub fn bind(&self, args: &CallArgs) -> BindResult<BoundArgs> {
        self.inner.signature.bind(&self.inner.name, args)
    }

    /// Invoke the function.
    pub fn call(&self, args: &CallArgs) -> CallResult<Value> {
        trace!(
            function = %self.inner.name,
            positional = args.positional.len(),
            keyword = args.keyword.len(),
            "Calling function"
        );
        (self.inner.body)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.inner.name)
            .field("module", &self.inner.module)
            .field("signature", &self.inner.signature.to_string())
            .field("wrapper", &self.inner.wrapped.is_some())
            .finish()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.inner.name, self.inner.signature)
    }
}

/// Builder for [`Function`].
#[derive(Debug)]
pub struct FunctionBuilder {
    name: String,
    module: String,
    signature: Signature,
}

impl FunctionBuilder {
    /// Create a builder with an empty signature.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: DEFAULT_MODULE.to_string(),
            signature: Signature::empty(),
        }
    }

    /// Set the module.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Set the signature.
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = signature;
        self
    }

    /// Attach the body and build the function.
    pub fn build<F>(self, body: F) -> Function
    where
        F: Fn(&CallArgs) -> CallResult<Value> + Send + Sync + 'static,
    {
        Function {
            inner: Arc::new(FunctionInner {
                name: self.name,
                module: self.module,
                signature: self.signature,
                body: Box::new(body),
                wrapped: None,
                defaults: OnceLock::new(),
            }),
        }
    }
}
