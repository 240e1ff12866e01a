//! Command-line call arguments.
//!
//! `key=value` is a keyword argument and anything else is positional. Values
//! are read as JSON, falling back to the raw text as a string.

use decorate_core::{CallArgs, Value};

/// Parse a single value.
pub fn parse_value(text: &str) -> Value {
    serde_json::from_str(text)
        .map(Value::from_json)
        .unwrap_or_else(|_| Value::from(text))
}

/// Parse a list of command-line arguments into a call.
pub fn parse_call(raw: &[String]) -> CallArgs {
    let mut call = CallArgs::new();
    for arg in raw {
        match split_keyword(arg) {
            Some((name, value)) => call = call.kwarg(name, parse_value(value)),
            None => call = call.arg(parse_value(arg)),
        }
    }
    call
}

fn split_keyword(arg: &str) -> Option<(&str, &str)> {
    let (name, value) = arg.split_once('=')?;
    let is_identifier = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    is_identifier.then_some((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), Value::Int(42));
        assert_eq!(parse_value("2.5"), Value::Float(2.5));
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("null"), Value::None);
        assert_eq!(parse_value("\"quoted\""), Value::from("quoted"));
        assert_eq!(parse_value("World"), Value::from("World"));
        assert_eq!(
            parse_value("[1, \"a\"]"),
            Value::List(vec![Value::Int(1), Value::from("a")])
        );
    }

    #[test]
    fn test_parse_call() {
        let call = parse_call(&strings(&["1", "two", "key=v", "n=3"]));
        assert_eq!(call.positional, vec![Value::Int(1), Value::from("two")]);
        assert_eq!(call.get_kwarg("key"), Some(&Value::from("v")));
        assert_eq!(call.get_kwarg("n"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_non_identifier_equals_is_positional() {
        let call = parse_call(&strings(&["a b=c", "=x", "1=2"]));
        assert_eq!(call.positional.len(), 3);
        assert!(call.keyword.is_empty());
    }
}
