//! Run command - Call a catalog function through interceptors.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use decorate::prelude::*;

use crate::OutputFormat;
use crate::config::CliConfig;
use crate::{catalog, input};

/// Observers keep at most this many calls.
const MAX_RECORDED_CALLS: usize = 64;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Catalog function name (greet, add, collect, fail)
    #[arg(required = true)]
    pub function: String,

    /// Forward call arguments and defaults to observers
    #[arg(long)]
    pub pass_inputs: bool,

    /// Forward the function itself to observers
    #[arg(long)]
    pub pass_func: bool,

    /// Forward the return value to post-call observers
    #[arg(long)]
    pub pass_output: bool,

    /// Log timestamped call and return lines
    #[arg(long)]
    pub debug: bool,

    /// Call arguments: `value` or `name=value`
    #[arg(last = true)]
    pub args: Vec<String>,
}

impl RunArgs {
    /// Command-line flags switch on what the configuration leaves off.
    fn intercept_config(&self, base: InterceptConfig) -> InterceptConfig {
        base.with_inputs(base.pass_inputs || self.pass_inputs)
            .with_func(base.pass_func || self.pass_func)
            .with_output(base.pass_output || self.pass_output)
    }
}

/// Run report.
#[derive(Debug, Serialize)]
struct RunReport {
    function: String,
    config: InterceptConfig,
    call: CallArgs,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    precall: Vec<CallArgs>,
    postcall: Vec<CallArgs>,
}

/// Execute the run command.
pub fn execute(args: RunArgs, config: Option<&Path>, format: OutputFormat, quiet: bool) -> Result<()> {
    let file = CliConfig::load(config)?;
    let intercept = args.intercept_config(file.intercept);

    let target = catalog::lookup(&args.function)?;
    let call = input::parse_call(&args.args);

    let pre_audit = Arc::new(CollectingObserver::new(MAX_RECORDED_CALLS));
    let post_audit = Arc::new(CollectingObserver::new(MAX_RECORDED_CALLS));

    let pre = PreCall::new(
        Observers::none()
            .with_shared(Arc::clone(&pre_audit))
            .with(LoggingObserver::new().with_label("precall")),
    )
    .with_config(intercept);
    let post = PostCall::new(
        Observers::none()
            .with_shared(Arc::clone(&post_audit))
            .with(LoggingObserver::new().with_label("postcall")),
    )
    .with_config(intercept);

    let mut wrapped = post.wrap(&pre.wrap(&target));
    if args.debug {
        wrapped = debug(&wrapped);
    }

    if !quiet {
        tracing::info!(
            function = target.name(),
            pass_inputs = intercept.pass_inputs,
            pass_func = intercept.pass_func,
            pass_output = intercept.pass_output,
            "Calling function"
        );
    }

    let outcome = wrapped.call(&call);

    let report = RunReport {
        function: target.to_string(),
        config: intercept,
        call,
        result: outcome.as_ref().ok().cloned(),
        error: outcome.as_ref().err().map(ToString::to_string),
        precall: pre_audit.calls(),
        postcall: post_audit.calls(),
    };

    // Output results
    match format {
        OutputFormat::Human => {
            println!("Function: {}", report.function);
            println!("Call: {}", report.call);
            match (&report.result, &report.error) {
                (Some(result), _) => println!("Result: {}", result),
                (_, Some(error)) => println!("Error: {}", error),
                _ => {}
            }
            println!();
            print_observed("Pre-call observers saw", &report.precall);
            print_observed("Post-call observers saw", &report.postcall);
        }
        OutputFormat::Json | OutputFormat::JsonCompact => {
            println!("{}", format.to_json(&report)?);
        }
    }

    outcome
        .map(|_| ())
        .with_context(|| format!("Call to '{}' failed", args.function))
}

fn print_observed(title: &str, calls: &[CallArgs]) {
    println!("{} ({}):", title, calls.len());
    for call in calls {
        println!("  {}", call);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(pass_func: bool) -> RunArgs {
        RunArgs {
            function: "greet".to_string(),
            pass_inputs: false,
            pass_func,
            pass_output: false,
            debug: false,
            args: Vec::new(),
        }
    }

    #[test]
    fn test_flags_extend_config() {
        let base = InterceptConfig::new().with_inputs(true);
        let config = run_args(true).intercept_config(base);
        assert!(config.pass_inputs);
        assert!(config.pass_func);
        assert!(!config.pass_output);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let base = InterceptConfig::all();
        assert_eq!(run_args(false).intercept_config(base), base);
    }
}
