//! Pre-call interceptor.

use decorate_compose::ArgComposer;
use decorate_core::Function;
use tracing::debug;

use crate::config::InterceptConfig;
use crate::observer::Observers;

/// Notifies observers before the target runs.
///
/// Observers run in registration order with the arguments composed from the
/// interceptor's flags. An observer error propagates and the target is not
/// called. Otherwise the target runs with the original arguments and its
/// result is returned unchanged.
///
/// # Example
///
/// ```
/// use decorate_core::{CallArgs, Function, Signature, Value};
/// use decorate_intercept::{Observers, PreCall};
///
/// let target = Function::new("f", Signature::variadic(), |_| Ok(Value::Int(1)));
/// let observers = Observers::none().with_fn(|args| {
///     assert_eq!(args.positional, vec![Value::Int(7)]);
///     Ok(())
/// });
///
/// let wrapped = PreCall::new(observers).pass_inputs(true).wrap(&target);
/// assert_eq!(wrapped.call(&CallArgs::new().arg(7))?, Value::Int(1));
/// assert_eq!(wrapped.name(), "f");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PreCall {
    observers: Observers,
    config: InterceptConfig,
}

impl PreCall {
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

    /// Take the flags from a configuration. `pass_output` is ignored.
    pub fn with_config(mut self, config: InterceptConfig) -> Self {
        self.config = config.with_output(false);
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
        let steps = self.config.pre_steps();

        Function::wrapping(target, move |args| {
            let composed = ArgComposer::new(&inner, args, steps.iter().cloned()).compose();
            debug!(
                function = inner.name(),
                observers = observers.len(),
                positional = composed.positional.len(),
                keyword = composed.keyword.len(),
                "Notifying pre-call observers"
            );
            observers.notify(&composed)?;
            inner.call(args)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::observer::CollectingObserver;
    use decorate_core::{CallArgs, CallError, Signature, Value};

    fn collect_fn(calls: Arc<AtomicUsize>) -> Function {
        let signature = Signature::builder()
            .positional_with_default("default", "x")
            .var_positional("args")
            .var_keyword("kwargs")
            .build()
            .unwrap();
        Function::new("collect", signature, move |args| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Int(args.len() as i64))
        })
    }

    #[test]
    fn test_no_flags_observer_sees_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let target = collect_fn(Arc::clone(&calls));
        let collector = Arc::new(CollectingObserver::new(10));

        let wrapped = PreCall::new(Observers::none().with_shared(Arc::clone(&collector)))
            .wrap(&target);
        let result = wrapped.call(&CallArgs::new().arg(1).kwarg("k", 2)).unwrap();

        assert_eq!(result, Value::Int(2));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(collector.calls(), vec![CallArgs::new()]);
    }

    #[test]
    fn test_pass_inputs_and_func() {
        let calls = Arc::new(AtomicUsize::new(0));
        let target = collect_fn(Arc::clone(&calls));
        let collector = Arc::new(CollectingObserver::new(10));

        let wrapped = PreCall::new(Observers::none().with_shared(Arc::clone(&collector)))
            .pass_inputs(true)
            .pass_func(true)
            .wrap(&target);
        wrapped.call(&CallArgs::new().arg(1).arg(2)).unwrap();

        let seen = collector.last().unwrap();
        assert_eq!(seen.positional.len(), 3);
        // the observer receives the original target, not the wrapper
        assert!(seen.positional[0].as_function().unwrap().ptr_eq(&target));
        assert_eq!(seen.positional[1..], [Value::Int(1), Value::Int(2)]);
        assert_eq!(seen.keyword["default"], Value::from("x"));
    }

    #[test]
    fn test_observers_run_in_order() {
        let target = collect_fn(Arc::new(AtomicUsize::new(0)));
        let counter = Arc::new(AtomicUsize::new(0));
        let first = Arc::clone(&counter);
        let second = Arc::clone(&counter);

        let observers = Observers::none()
            .with_fn(move |_| {
                assert_eq!(first.fetch_add(1, Ordering::SeqCst), 0);
                Ok(())
            })
            .with_fn(move |_| {
                assert_eq!(second.fetch_add(1, Ordering::SeqCst), 1);
                Ok(())
            });

        PreCall::new(observers)
            .wrap(&target)
            .call(&CallArgs::new())
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_observer_error_skips_target() {
        let calls = Arc::new(AtomicUsize::new(0));
        let target = collect_fn(Arc::clone(&calls));
        let observers = Observers::none().with_fn(|_| Err(CallError::failed("guard", "denied")));

        let err = PreCall::new(observers)
            .wrap(&target)
            .call(&CallArgs::new())
            .unwrap_err();

        assert_eq!(err, CallError::failed("guard", "denied"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_zero_observers() {
        let calls = Arc::new(AtomicUsize::new(0));
        let target = collect_fn(Arc::clone(&calls));

        let wrapped = PreCall::new(Observers::none()).pass_inputs(true).wrap(&target);
        assert_eq!(wrapped.call(&CallArgs::new().arg(1)).unwrap(), Value::Int(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_config_drops_output_flag() {
        let pre = PreCall::new(Observers::none()).with_config(InterceptConfig::all());
        assert!(pre.config().pass_inputs);
        assert!(pre.config().pass_func);
        assert!(!pre.config().pass_output);
    }

    #[test]
    fn test_wrapper_identity() {
        let target = collect_fn(Arc::new(AtomicUsize::new(0)));
        let wrapped = PreCall::new(Observers::none()).wrap(&target);

        assert_eq!(wrapped.name(), "collect");
        assert_eq!(wrapped.signature(), target.signature());
        assert!(wrapped.wrapped().unwrap().ptr_eq(&target));
    }
}
