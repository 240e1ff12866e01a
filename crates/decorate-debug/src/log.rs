//! Input and output logging, standalone and as wrappers.
//!
//! Every line goes to `tracing` at debug level with the function's module in
//! the `module` field.

use tracing::debug;

use decorate_compose::ArgComposer;
use decorate_core::{CallArgs, Function, Value};

use crate::line::{self, CallId};

/// Build the input line for a call, composing the full argument view.
pub fn input_line(function: &Function, args: &CallArgs) -> String {
    let composed = ArgComposer::full_view(function, args);
    line::call_line(&line::now(), function.name(), &composed)
}

/// Build the output line for a call.
pub fn output_line(function: &Function, output: &Value) -> String {
    line::return_line(&line::now(), function.name(), output)
}

/// Log the full argument view of a call without wrapping anything.
pub fn log_input(function: &Function, args: &CallArgs) {
    let message = input_line(function, args);
    debug!(module = function.module(), "{}", message);
}

/// Log a previously obtained output without wrapping anything.
pub fn log_output(function: &Function, output: &Value) {
    let message = output_line(function, output);
    debug!(module = function.module(), "{}", message);
}

/// Wrap `target` so every call logs its inputs first.
pub fn debug_input(target: &Function) -> Function {
    let inner = target.clone();
    Function::wrapping(target, move |args| {
        log_input(&inner, args);
        inner.call(args)
    })
}

/// Wrap `target` so every successful call logs its output.
pub fn debug_output(target: &Function) -> Function {
    let inner = target.clone();
    Function::wrapping(target, move |args| {
        let output = inner.call(args)?;
        log_output(&inner, &output);
        Ok(output)
    })
}

/// Wrap `target` so every call logs its inputs and its output.
///
/// Both lines of one call carry the same `call_id` field.
pub fn debug(target: &Function) -> Function {
    let inner = target.clone();
    Function::wrapping(target, move |args| {
        let call_id = CallId::new();
        let module = inner.module();

        let message = input_line(&inner, args);
        debug!(module, call_id = %call_id, "{}", message);

        let output = inner.call(args)?;

        let message = output_line(&inner, &output);
        debug!(module, call_id = %call_id, "{}", message);
        Ok(output)
    })
}
