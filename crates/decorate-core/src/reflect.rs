//! Parameter reflection.
//!
//! Reads declared defaults out of a [`Signature`] without invoking anything.

use crate::signature::{Parameter, Signature};
use crate::value::{Value, ValueMap};

/// Mapping from parameter name to declared default value.
pub type DefaultMap = ValueMap;

/// Collect every declared default, in declaration order.
///
/// Parameters without a default are omitted. Variadic collectors never carry
/// one, so they are skipped rather than rejected.
pub fn defaults(signature: &Signature) -> DefaultMap {
    signature
        .parameters()
        .iter()
        .filter(|p| !p.kind().is_variadic())
        .filter_map(|p| p.default().map(|d| (p.name().to_string(), d.clone())))
        .collect()
}

/// Parameters that must be supplied by the caller.
pub fn required(signature: &Signature) -> Vec<&Parameter> {
    signature
        .parameters()
        .iter()
        .filter(|p| p.is_required())
        .collect()
}

/// Look up the default of a single parameter.
pub fn default_of<'a>(signature: &'a Signature, name: &str) -> Option<&'a Value> {
    signature.get(name).and_then(Parameter::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mixed_kinds() {
        let sig = Signature::builder()
            .positional("a")
            .positional_with_default("b", "x")
            .var_positional("args")
            .keyword_only("c")
            .keyword_only_with_default("d", 4)
            .var_keyword("kwargs")
            .build()
            .unwrap();

        let map = defaults(&sig);
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["b", "d"]);
        assert_eq!(map["b"], Value::from("x"));
        assert_eq!(map["d"], Value::Int(4));
    }

    #[test]
    fn test_defaults_empty() {
        assert!(defaults(&Signature::empty()).is_empty());
        assert!(defaults(&Signature::variadic()).is_empty());
    }

    #[test]
    fn test_required() {
        let sig = Signature::builder()
            .positional("name")
            .positional_with_default("punctuation", "!")
            .var_keyword("kwargs")
            .build()
            .unwrap();

        let names: Vec<&str> = required(&sig).iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["name"]);
        assert_eq!(default_of(&sig, "punctuation"), Some(&Value::from("!")));
        assert_eq!(default_of(&sig, "name"), None);
    }
}
