//! Demo functions the CLI can wrap.

use anyhow::{Result, bail};

use decorate_core::{CallError, Function, Signature, SignatureResult, Value, ValueMap};

/// Module reported by catalog functions.
pub const MODULE: &str = "catalog";

/// Names of every catalog function.
pub const NAMES: [&str; 4] = ["greet", "add", "collect", "fail"];

/// Look up a catalog function by name.
pub fn lookup(name: &str) -> Result<Function> {
    let function = match name {
        "greet" => greet()?,
        "add" => add()?,
        "collect" => collect()?,
        "fail" => fail()?,
        other => bail!(
            "Unknown function '{}'. Available: {}",
            other,
            NAMES.join(", ")
        ),
    };
    Ok(function)
}

fn build<F>(name: &str, signature: Signature, body: F) -> Function
where
    F: Fn(&Signature, &decorate_core::CallArgs) -> Result<Value, CallError> + Send + Sync + 'static,
{
    let bind_signature = signature.clone();
    Function::builder(name)
        .with_module(MODULE)
        .with_signature(signature)
        .build(move |args| body(&bind_signature, args))
}

/// `greet(name, punctuation='!')`
fn greet() -> SignatureResult<Function> {
    let signature = Signature::builder()
        .positional("name")
        .positional_with_default("punctuation", "!")
        .build()?;

    Ok(build("greet", signature, |signature, args| {
        let bound = signature.bind("greet", args)?;
        Ok(Value::from(format!(
            "Hello, {}{}",
            bound.str("name")?,
            bound.str("punctuation")?
        )))
    }))
}

/// `add(a, b=0)`
fn add() -> SignatureResult<Function> {
    let signature = Signature::builder()
        .positional("a")
        .positional_with_default("b", 0)
        .build()?;

    Ok(build("add", signature, |signature, args| {
        let bound = signature.bind("add", args)?;
        let a = bound.require("a")?;
        let b = bound.require("b")?;
        match (a, b) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_add(*b)
                .map(Value::Int)
                .ok_or_else(|| CallError::failed("add", "integer overflow")),
            _ => Ok(Value::Float(bound.float("a")? + bound.float("b")?)),
        }
    }))
}

/// `collect(default='default', *args, **kwargs)`
fn collect() -> SignatureResult<Function> {
    let signature = Signature::builder()
        .positional_with_default("default", "default")
        .var_positional("args")
        .var_keyword("kwargs")
        .build()?;

    Ok(build("collect", signature, |signature, args| {
        let bound = signature.bind("collect", args)?;
        let values: ValueMap = bound.into_values();
        Ok(Value::Map(values))
    }))
}

/// `fail(message='boom')`
fn fail() -> SignatureResult<Function> {
    let signature = Signature::builder()
        .positional_with_default("message", "boom")
        .build()?;

    Ok(build("fail", signature, |signature, args| {
        let bound = signature.bind("fail", args)?;
        Err(CallError::failed("fail", bound.str("message")?))
    }))
}
