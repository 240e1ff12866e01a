//! Inspect command - Show a catalog function's signature and defaults.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use decorate::prelude::*;

use crate::OutputFormat;
use crate::catalog;

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Catalog function name (greet, add, collect, fail)
    #[arg(required = true)]
    pub function: String,
}

/// Inspection result.
#[derive(Debug, Serialize)]
struct InspectionResult {
    name: String,
    module: String,
    signature: String,
    parameters: Vec<ParameterDisplay>,
    required: Vec<String>,
    defaults: ValueMap,
}

#[derive(Debug, Serialize)]
struct ParameterDisplay {
    name: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
}

impl From<&Parameter> for ParameterDisplay {
    fn from(param: &Parameter) -> Self {
        Self {
            name: param.name().to_string(),
            kind: param.kind().as_str(),
            default: param.default().cloned(),
        }
    }
}

/// Execute the inspect command.
pub fn execute(args: InspectArgs, format: OutputFormat) -> Result<()> {
    let function = catalog::lookup(&args.function)?;
    let signature = function.signature();

    let result = InspectionResult {
        name: function.name().to_string(),
        module: function.module().to_string(),
        signature: signature.to_string(),
        parameters: signature.parameters().iter().map(ParameterDisplay::from).collect(),
        required: decorate_core::reflect::required(signature)
            .into_iter()
            .map(|p| p.name().to_string())
            .collect(),
        defaults: function.defaults().clone(),
    };

    // Output results
    match format {
        OutputFormat::Human => {
            println!("Function: {}{}", result.name, result.signature);
            println!("Module: {}", result.module);
            println!();

            println!("Parameters ({}):", result.parameters.len());
            for param in &result.parameters {
                match &param.default {
                    Some(default) => println!("  {} [{}] = {}", param.name, param.kind, default),
                    None => println!("  {} [{}]", param.name, param.kind),
                }
            }
            println!();

            if result.required.is_empty() {
                println!("Required: none");
            } else {
                println!("Required: {}", result.required.join(", "));
            }
            println!("Defaults: {}", Value::Map(result.defaults.clone()));
        }
        OutputFormat::Json | OutputFormat::JsonCompact => {
            println!("{}", format.to_json(&result)?);
        }
    }

    Ok(())
}
