//! The argument composer.
//!
//! [`ArgComposer`] derives observer-facing arguments from a real call by
//! applying a configuration sequence, step by step, to an accumulator that
//! starts empty.

use decorate_core::{CallArgs, Function, Value};
use tracing::trace;

use crate::error::ComposeResult;
use crate::step::{RawStep, Step, decode};

/// Composes arguments for one call of one function.
///
/// # Example
///
/// ```
/// use decorate_compose::{ArgComposer, Step};
/// use decorate_core::{CallArgs, Function, Signature, Value};
///
/// let signature = Signature::builder()
///     .positional_with_default("default", "x")
///     .var_positional("args")
///     .var_keyword("kwargs")
///     .build()?;
/// let f = Function::new("f", signature, |_| Ok(Value::None));
///
/// let call = CallArgs::new().arg(1).arg(2).kwarg("key", "v");
/// let composed = ArgComposer::new(&f, &call, Step::inputs()).compose();
///
/// assert_eq!(composed.positional, vec![Value::Int(1), Value::Int(2)]);
/// assert_eq!(composed.keyword["key"], Value::from("v"));
/// assert_eq!(composed.keyword["default"], Value::from("x"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct ArgComposer<'a> {
    function: &'a Function,
    call: &'a CallArgs,
    steps: Vec<Step>,
}

impl<'a> ArgComposer<'a> {
    /// Create a composer over the given call and configuration sequence.
    pub fn new(
        function: &'a Function,
        call: &'a CallArgs,
        steps: impl IntoIterator<Item = Step>,
    ) -> Self {
        Self {
            function,
            call,
            steps: steps.into_iter().collect(),
        }
    }

    /// Create a composer from undecoded steps.
    ///
    /// # Errors
    ///
    /// Fails on the first step whose tag is not supported.
    pub fn from_raw<I>(function: &'a Function, call: &'a CallArgs, raw: I) -> ComposeResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<RawStep>,
    {
        Ok(Self::new(function, call, decode(raw)?))
    }

    /// Compose the full argument view: positional, keyword, then defaults.
    pub fn full_view(function: &'a Function, call: &'a CallArgs) -> CallArgs {
        Self::new(function, call, Step::inputs()).compose()
    }

    /// The configuration sequence.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Apply every step in order and return the composed arguments.
    pub fn compose(self) -> CallArgs {
        let mut acc = CallArgs::new();
        for step in self.steps.iter() {
            self.apply(step, &mut acc);
            trace!(
                function = self.function.name(),
                step = %step.tag(),
                positional = acc.positional.len(),
                keyword = acc.keyword.len(),
                "Applied configuration step"
            );
        }
        acc
    }

    fn apply(&self, step: &Step, acc: &mut CallArgs) {
        match step {
            Step::IncludeArgs => include_args(acc, self.call),
            Step::IncludeKwargs => include_kwargs(acc, self.call),
            Step::IncludeDefaults => include_defaults(acc, self.function),
            Step::PrependFunction => prepend_function(acc, self.function),
            Step::AppendOutput(output) => append_output(acc, output),
        }
    }
}

fn include_args(acc: &mut CallArgs, call: &CallArgs) {
    acc.positional.extend(call.positional.iter().cloned());
}

fn include_kwargs(acc: &mut CallArgs, call: &CallArgs) {
    for (name, value) in &call.keyword {
        acc.keyword.insert(name.clone(), value.clone());
    }
}

fn include_defaults(acc: &mut CallArgs, function: &Function) {
    for (name, default) in function.defaults() {
        if !acc.keyword.contains_key(name) {
            acc.keyword.insert(name.clone(), default.clone());
        }
    }
}

fn prepend_function(acc: &mut CallArgs, function: &Function) {
    acc.positional.insert(0, Value::Function(function.clone()));
}

fn append_output(acc: &mut CallArgs, output: &Value) {
    acc.positional.push(output.clone());
}
