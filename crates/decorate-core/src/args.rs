//! Call arguments.
//!
//! [`CallArgs`] is the generic call shape forwarded through every wrapper: an
//! ordered list of positional values and an insertion-ordered map of keyword
//! values. The same type carries the composed arguments handed to observers.

use std::fmt;

use serde::Serialize;

use crate::value::{Value, ValueMap, write_map};

/// Positional and keyword arguments of a single call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallArgs {
    /// Positional arguments, in call order.
    pub positional: Vec<Value>,
    /// Keyword arguments, in insertion order.
    pub keyword: ValueMap,
}

impl CallArgs {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create arguments from positional and keyword parts.
    pub fn from_parts(positional: Vec<Value>, keyword: ValueMap) -> Self {
        Self {
            positional,
            keyword,
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Append several positional arguments.
    pub fn args<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.positional.extend(values.into_iter().map(Into::into));
        self
    }

    /// Set a keyword argument, replacing any previous value for the name.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    /// Get a positional argument by index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Get the last positional argument.
    pub fn last(&self) -> Option<&Value> {
        self.positional.last()
    }

    /// Get a keyword argument by name.
    pub fn get_kwarg(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// Check if there are no arguments at all.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Total number of arguments.
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    /// Split into positional and keyword parts.
    pub fn into_parts(self) -> (Vec<Value>, ValueMap) {
        (self.positional, self.keyword)
    }

    /// Render the positional arguments as a tuple, e.g. `('World',)`.
    pub fn positional_display(&self) -> PositionalDisplay<'_> {
        PositionalDisplay(&self.positional)
    }

    /// Render the keyword arguments as a map, e.g. `{'key': 'value'}`.
    pub fn keyword_display(&self) -> KeywordDisplay<'_> {
        KeywordDisplay(&self.keyword)
    }
}

/// Tuple-style display of positional arguments.
pub struct PositionalDisplay<'a>(&'a [Value]);

impl fmt::Display for PositionalDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        if self.0.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

/// Map-style display of keyword arguments.
pub struct KeywordDisplay<'a>(&'a ValueMap);

impl fmt::Display for KeywordDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_map(f, self.0)
    }
}

impl fmt::Display for CallArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "args={} kwargs={}",
            self.positional_display(),
            self.keyword_display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let args = CallArgs::new().arg(1).arg("two").kwarg("key", "value");

        assert_eq!(args.positional, vec![Value::Int(1), Value::from("two")]);
        assert_eq!(args.get_kwarg("key"), Some(&Value::from("value")));
        assert_eq!(args.len(), 3);
        assert!(!args.is_empty());
    }

    #[test]
    fn test_kwarg_replaces() {
        let args = CallArgs::new().kwarg("a", 1).kwarg("a", 2);
        assert_eq!(args.keyword.len(), 1);
        assert_eq!(args.get_kwarg("a"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_positional_display() {
        assert_eq!(CallArgs::new().positional_display().to_string(), "()");
        assert_eq!(
            CallArgs::new().arg("World").positional_display().to_string(),
            "('World',)"
        );
        assert_eq!(
            CallArgs::new().args([1, 2]).positional_display().to_string(),
            "(1, 2)"
        );
    }
}
