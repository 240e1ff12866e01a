//! Compose command - Compose arguments for a call from a list of steps.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use decorate::prelude::*;

use crate::OutputFormat;
use crate::{catalog, input};

/// Arguments for the compose command.
#[derive(Args)]
pub struct ComposeArgs {
    /// Catalog function name (greet, add, collect, fail)
    #[arg(required = true)]
    pub function: String,

    /// Configuration steps in order (include-args, include-kwargs,
    /// include-defaults, prepend-function, append-output)
    #[arg(short, long = "step", required = true)]
    pub steps: Vec<String>,

    /// Payload for append-output steps (as a JSON value)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Call arguments: `value` or `name=value`
    #[arg(last = true)]
    pub args: Vec<String>,
}

/// Composition result.
#[derive(Debug, Serialize)]
struct CompositionResult {
    function: String,
    steps: Vec<String>,
    call: CallArgs,
    composed: CallArgs,
}

/// Execute the compose command.
pub fn execute(args: ComposeArgs, format: OutputFormat) -> Result<()> {
    let function = catalog::lookup(&args.function)?;
    let call = input::parse_call(&args.args);
    let payload = args.output.as_deref().map(input::parse_value);

    let steps = args
        .steps
        .iter()
        .map(|name| {
            let tag: StepTag = name.parse()?;
            let payload = if tag.takes_payload() {
                Some(payload.clone().unwrap_or_default())
            } else {
                None
            };
            Step::from_tag(tag, payload)
        })
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid configuration sequence")?;

    tracing::info!(
        function = function.name(),
        steps = steps.len(),
        "Composing arguments"
    );

    let result = CompositionResult {
        function: function.name().to_string(),
        steps: steps.iter().map(Step::to_string).collect(),
        composed: ArgComposer::new(&function, &call, steps).compose(),
        call,
    };

    // Output results
    match format {
        OutputFormat::Human => {
            println!("Function: {}", function);
            println!("Steps: {}", result.steps.join(" -> "));
            println!("Call: {}", result.call);
            println!("Composed: {}", result.composed);
        }
        OutputFormat::Json | OutputFormat::JsonCompact => {
            println!("{}", format.to_json(&result)?);
        }
    }

    Ok(())
}
