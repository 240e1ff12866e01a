//! Interceptor configuration.
//!
//! [`InterceptConfig`] holds the flags that decide what observers see. It
//! deserializes from a TOML table:
//!
//! ```toml
//! [intercept]
//! pass_inputs = true
//! pass_func = false
//! pass_output = true
//! ```

use decorate_compose::Step;
use decorate_core::Value;
use serde::{Deserialize, Serialize};

/// Flags controlling which derived arguments reach observers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptConfig {
    /// Forward the call's positional and keyword arguments, plus defaults.
    pub pass_inputs: bool,

    /// Forward the target function as the first positional argument.
    pub pass_func: bool,

    /// Forward the return value as the last positional argument.
    ///
    /// Only post-call interceptors have a return value to forward.
    pub pass_output: bool,
}

impl InterceptConfig {
    /// Create a configuration that forwards nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward everything available.
    pub fn all() -> Self {
        Self {
            pass_inputs: true,
            pass_func: true,
            pass_output: true,
        }
    }

    /// Forward or withhold call inputs.
    pub fn with_inputs(mut self, enabled: bool) -> Self {
        self.pass_inputs = enabled;
        self
    }

    /// Forward or withhold the target function.
    pub fn with_func(mut self, enabled: bool) -> Self {
        self.pass_func = enabled;
        self
    }

    /// Forward or withhold the return value.
    pub fn with_output(mut self, enabled: bool) -> Self {
        self.pass_output = enabled;
        self
    }

    /// Configuration sequence for a pre-call interceptor.
    pub fn pre_steps(&self) -> Vec<Step> {
        let mut steps = Vec::with_capacity(4);
        if self.pass_inputs {
            steps.extend(Step::inputs());
        }
        if self.pass_func {
            steps.push(Step::PrependFunction);
        }
        steps
    }

    /// Configuration sequence for a post-call interceptor.
    pub fn post_steps(&self, output: &Value) -> Vec<Step> {
        let mut steps = self.pre_steps();
        if self.pass_output {
            steps.push(Step::AppendOutput(output.clone()));
        }
        steps
    }
}
