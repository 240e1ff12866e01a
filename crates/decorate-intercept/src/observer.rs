//! Observers and the observer list.
//!
//! An [`Observer`] receives the composed arguments of a call. Whatever it
//! computes is discarded; only an error escapes, and it stops the remaining
//! observers.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::Level;

use decorate_core::{CallArgs, CallResult, Function, Value};

use crate::error::{InterceptError, InterceptResult};

/// A side-effect-only callable notified with composed arguments.
pub trait Observer: Send + Sync {
    /// Called with the composed arguments of one invocation.
    fn observe(&self, args: &CallArgs) -> CallResult<()>;

    /// Name used in logs.
    fn name(&self) -> &str {
        "observer"
    }
}

impl<F> Observer for F
where
    F: Fn(&CallArgs) -> CallResult<()> + Send + Sync,
{
    fn observe(&self, args: &CallArgs) -> CallResult<()> {
        self(args)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

impl Observer for Function {
    fn observe(&self, args: &CallArgs) -> CallResult<()> {
        self.call(args).map(|_| ())
    }

    fn name(&self) -> &str {
        Function::name(self)
    }
}

/// An ordered list of observers.
///
/// Cloning shares the observers; the list itself is never mutated after an
/// interceptor takes it.
#[derive(Clone, Default)]
pub struct Observers {
    list: Vec<Arc<dyn Observer>>,
}

impl Observers {
    /// An empty list.
    pub fn none() -> Self {
        Self::default()
    }

    /// A one-element list.
    pub fn one(observer: impl Observer + 'static) -> Self {
        Self::none().with(observer)
    }

    /// Append an observer.
    pub fn with(mut self, observer: impl Observer + 'static) -> Self {
        self.list.push(Arc::new(observer));
        self
    }

    /// Append a closure observer.
    pub fn with_fn<F>(self, observer: F) -> Self
    where
        F: Fn(&CallArgs) -> CallResult<()> + Send + Sync + 'static,
    {
        self.with(observer)
    }

    /// Append an observer the caller keeps a handle to.
    pub fn with_shared<O: Observer + 'static>(mut self, observer: Arc<O>) -> Self {
        self.list.push(observer);
        self
    }

    /// Build the list from a dynamic value: `None`, a function, or a list of
    /// functions.
    ///
    /// # Errors
    ///
    /// Fails for any other value, including a list holding a non-function.
    pub fn try_from_value(value: Value) -> InterceptResult<Self> {
        match value {
            Value::None => Ok(Self::none()),
            Value::Function(function) => Ok(Self::one(function)),
            Value::List(items) => {
                let mut observers = Self::none();
                for item in items {
                    match item {
                        Value::Function(function) => observers = observers.with(function),
                        other => {
                            return Err(InterceptError::InvalidObservers {
                                received: format!("list containing {}", other.type_name()),
                            });
                        }
                    }
                }
                Ok(observers)
            }
            other => Err(InterceptError::InvalidObservers {
                received: other.type_name().to_string(),
            }),
        }
    }

    /// Number of observers.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterate over the observers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Observer> {
        self.list.iter().map(|o| o.as_ref())
    }

    /// Notify every observer in order, stopping at the first error.
    pub fn notify(&self, args: &CallArgs) -> CallResult<()> {
        for observer in &self.list {
            tracing::trace!(observer = observer.name(), "Notifying observer");
            observer.observe(args)?;
        }
        Ok(())
    }
}

impl From<Function> for Observers {
    fn from(function: Function) -> Self {
        Self::one(function)
    }
}

impl From<Vec<Function>> for Observers {
    fn from(functions: Vec<Function>) -> Self {
        functions.into_iter().fold(Self::none(), Self::with)
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.list.iter().map(|o| o.name()))
            .finish()
    }
}

/// An observer that logs composed arguments through `tracing`.
pub struct LoggingObserver {
    /// Level of the emitted event.
    pub log_level: Level,
    label: String,
}

impl LoggingObserver {
    /// Create a logging observer at debug level.
    pub fn new() -> Self {
        Self {
            log_level: Level::DEBUG,
            label: "logging".to_string(),
        }
    }

    /// Set the log level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set the label reported in the `observer` field.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for LoggingObserver {
    fn observe(&self, args: &CallArgs) -> CallResult<()> {
        let positional = args.positional_display();
        let keyword = args.keyword_display();
        let observer = self.label.as_str();

        if self.log_level == Level::ERROR {
            tracing::error!(observer, args = %positional, kwargs = %keyword, "Observed call");
        } else if self.log_level == Level::WARN {
            tracing::warn!(observer, args = %positional, kwargs = %keyword, "Observed call");
        } else if self.log_level == Level::INFO {
            tracing::info!(observer, args = %positional, kwargs = %keyword, "Observed call");
        } else if self.log_level == Level::DEBUG {
            tracing::debug!(observer, args = %positional, kwargs = %keyword, "Observed call");
        } else {
            tracing::trace!(observer, args = %positional, kwargs = %keyword, "Observed call");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for LoggingObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingObserver")
            .field("log_level", &self.log_level)
            .field("label", &self.label)
            .finish()
    }
}

/// An observer that records composed arguments for later inspection.
pub struct CollectingObserver {
    calls: RwLock<Vec<CallArgs>>,
    max_calls: usize,
}

impl CollectingObserver {
    /// Create a collector keeping at most `max_calls` records.
    pub fn new(max_calls: usize) -> Self {
        Self {
            calls: RwLock::new(Vec::new()),
            max_calls,
        }
    }

    /// Get recorded calls.
    pub fn calls(&self) -> Vec<CallArgs> {
        self.calls.read().clone()
    }

    /// Get the most recent record.
    pub fn last(&self) -> Option<CallArgs> {
        self.calls.read().last().cloned()
    }

    /// Clear recorded calls.
    pub fn clear(&self) {
        self.calls.write().clear();
    }

    /// Get record count.
    pub fn len(&self) -> usize {
        self.calls.read().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.calls.read().is_empty()
    }
}

impl Observer for CollectingObserver {
    fn observe(&self, args: &CallArgs) -> CallResult<()> {
        let mut calls = self.calls.write();
        if calls.len() < self.max_calls {
            calls.push(args.clone());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "collecting"
    }
}

impl fmt::Debug for CollectingObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectingObserver")
            .field("calls", &self.len())
            .field("max_calls", &self.max_calls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decorate_core::{CallError, Signature};

    fn noop(name: &str) -> Function {
        Function::new(name, Signature::variadic(), |_| Ok(Value::None))
    }

    #[test]
    fn test_try_from_value() {
        assert!(Observers::try_from_value(Value::None).unwrap().is_empty());
        assert_eq!(
            Observers::try_from_value(Value::Function(noop("a")))
                .unwrap()
                .len(),
            1
        );

        let list = Value::List(vec![Value::Function(noop("a")), Value::Function(noop("b"))]);
        let observers = Observers::try_from_value(list).unwrap();
        let names: Vec<&str> = observers.iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_try_from_value_rejects() {
        let err = Observers::try_from_value(Value::Int(3)).unwrap_err();
        assert_eq!(
            err,
            InterceptError::InvalidObservers {
                received: "int".to_string()
            }
        );

        let list = Value::List(vec![Value::Function(noop("a")), Value::from("x")]);
        let err = Observers::try_from_value(list).unwrap_err();
        assert!(err.to_string().contains("list containing str"));
    }

    #[test]
    fn test_notify_stops_at_first_error() {
        let collector = Arc::new(CollectingObserver::new(10));
        let observers = Observers::none()
            .with_fn(|_| Err(CallError::failed("first", "nope")))
            .with_shared(Arc::clone(&collector));

        let err = observers.notify(&CallArgs::new()).unwrap_err();
        assert_eq!(err, CallError::failed("first", "nope"));
        assert!(collector.is_empty());
    }

    #[test]
    fn test_function_observer_discards_result() {
        let f = Function::new("f", Signature::variadic(), |_| Ok(Value::Int(99)));
        let observers = Observers::from(f);
        assert!(observers.notify(&CallArgs::new().arg(1)).is_ok());
    }

    #[test]
    fn test_collecting_observer_max_calls() {
        let collector = CollectingObserver::new(2);
        for i in 0..5 {
            collector.observe(&CallArgs::new().arg(i as i64)).unwrap();
        }
        assert_eq!(collector.len(), 2);
        assert_eq!(collector.last().unwrap().positional, vec![Value::Int(1)]);

        collector.clear();
        assert!(collector.is_empty());
    }

    #[test]
    fn test_logging_observer() {
        let observer = LoggingObserver::new()
            .with_level(Level::INFO)
            .with_label("audit");
        assert_eq!(observer.name(), "audit");
        assert!(observer.observe(&CallArgs::new().kwarg("k", 1)).is_ok());
    }
}
