//! Post-call interceptor.

use decorate_compose::ArgComposer;
use decorate_core::Function;
use tracing::debug;

use crate::config::InterceptConfig;
use crate::observer::Observers;

/// Notifies observers after the target returns.
///
/// The target runs first with the original arguments. If it fails, the error
/// propagates and no observer runs. Otherwise observers run in registration
/// order and the captured result is returned unless an observer fails.
#[derive(Debug, Clone, Default)]
pub struct PostCall {
    observers: Observers,
    config: InterceptConfig,
}

impl PostCall {
    /// Create an interceptor that forwards nothing.
    pub fn new(observers: impl Into<Observers>) -> Self {
        Self {
            observers: observers.into(),
            config: InterceptConfig::default(),
        }
    }

    /// Forward the call's arguments and defaults.
    pub fn pass_inputs(mut self, enabled: bool) -> Self {
        self.config.pass_inputs = enabled;
        self
    }

    /// Forward the target function first.
    pub fn pass_func(mut self, enabled: bool) -> Self {
        self.config.pass_func = enabled;
        self
    }

    /// Forward the return value last.
    pub fn pass_output(mut self, enabled: bool) -> Self {
        self.config.pass_output = enabled;
        self
    }

    /// Take the flags from a configuration.
    pub fn with_config(mut self, config: InterceptConfig) -> Self {
        self.config = config;
        self
    }

    /// The registered observers.
    pub fn observers(&self) -> &Observers {
        &self.observers
    }

    /// The active flags.
    pub fn config(&self) -> InterceptConfig {
        self.config
    }

    /// Wrap `target`. The wrapper reports the target's name, module and
    /// signature.
    pub fn wrap(&self, target: &Function) -> Function {
        let inner = target.clone();
        let observers = self.observers.clone();
        let config = self.config;

        Function::wrapping(target, move |args| {
            let output = inner.call(args)?;
            let composed = ArgComposer::new(&inner, args, config.post_steps(&output)).compose();
            debug!(
                function = inner.name(),
                observers = observers.len(),
                positional = composed.positional.len(),
                keyword = composed.keyword.len(),
                "Notifying post-call observers"
            );
            observers.notify(&composed)?;
            Ok(output)
        })
    }
}
