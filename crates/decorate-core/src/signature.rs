//! Declared function signatures.
//!
//! A [`Signature`] is the parameter metadata a target function declares: names,
//! kinds and default values. The reflector reads defaults from it and bodies
//! use [`Signature::bind`] to resolve a generic [`CallArgs`] into named values.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::args::CallArgs;
use crate::error::{BindError, BindResult, CallError, CallResult, SignatureError, SignatureResult};
use crate::value::{Value, ValueMap};

/// How a parameter accepts its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ParameterKind {
    /// Positional only, cannot be passed by keyword.
    PositionalOnly,
    /// Positional or by keyword.
    PositionalOrKeyword,
    /// Collects excess positional arguments (`*args`).
    VarPositional,
    /// Keyword only.
    KeywordOnly,
    /// Collects excess keyword arguments (`**kwargs`).
    VarKeyword,
}

impl ParameterKind {
    /// Check if this kind collects a variable number of arguments.
    pub fn is_variadic(&self) -> bool {
        matches!(self, ParameterKind::VarPositional | ParameterKind::VarKeyword)
    }

    /// Check if this kind can be filled from a positional argument.
    pub fn accepts_positional(&self) -> bool {
        matches!(
            self,
            ParameterKind::PositionalOnly | ParameterKind::PositionalOrKeyword
        )
    }

    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::PositionalOnly => "positional-only",
            ParameterKind::PositionalOrKeyword => "positional-or-keyword",
            ParameterKind::VarPositional => "var-positional",
            ParameterKind::KeywordOnly => "keyword-only",
            ParameterKind::VarKeyword => "var-keyword",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    name: String,
    kind: ParameterKind,
    default: Option<Value>,
}

impl Parameter {
    /// Create a parameter of the given kind without a default.
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter kind.
    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// The declared default, if any.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Check if a value must be supplied for this parameter.
    pub fn is_required(&self) -> bool {
        self.default.is_none() && !self.kind.is_variadic()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParameterKind::VarPositional => write!(f, "*{}", self.name),
            ParameterKind::VarKeyword => write!(f, "**{}", self.name),
            _ => match &self.default {
                Some(default) => write!(f, "{}={}", self.name, default),
                None => write!(f, "{}", self.name),
            },
        }
    }
}

/// The ordered parameter list of a function.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Signature {
    parameters: Vec<Parameter>,
}

impl Signature {
    /// A signature with no parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building a signature.
    pub fn builder() -> SignatureBuilder {
        SignatureBuilder::new()
    }

    /// A signature accepting anything: `(*args, **kwargs)`.
    pub fn variadic() -> Self {
        Self {
            parameters: vec![
                Parameter::new("args", ParameterKind::VarPositional),
                Parameter::new("kwargs", ParameterKind::VarKeyword),
            ],
        }
    }

    /// The declared parameters in order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// The `*args` collector, if declared.
    pub fn var_positional(&self) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.kind == ParameterKind::VarPositional)
    }

    /// The `**kwargs` collector, if declared.
    pub fn var_keyword(&self) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.kind == ParameterKind::VarKeyword)
    }

    /// Bind call arguments to this signature.
    ///
    /// Positional arguments fill positional parameters in order, with the
    /// excess going to `*args`. Keywords fill named parameters, with unknown
    /// names going to `**kwargs`. Unfilled parameters take their defaults.
    pub fn bind(&self, function: &str, args: &CallArgs) -> BindResult<BoundArgs> {
        let positional_params: Vec<&Parameter> = self
            .parameters
            .iter()
            .filter(|p| p.kind.accepts_positional())
            .collect();

        let mut values: ValueMap = IndexMap::new();
        let mut extra_positional = Vec::new();
        let mut extra_keyword = ValueMap::new();

        for (index, value) in args.positional.iter().enumerate() {
            match positional_params.get(index) {
                Some(param) => {
                    values.insert(param.name.clone(), value.clone());
                }
                None if self.var_positional().is_some() => extra_positional.push(value.clone()),
                None => {
                    return Err(BindError::TooManyPositional {
                        function: function.to_string(),
                        expected: positional_params.len(),
                        given: args.positional.len(),
                    });
                }
            }
        }

        for (name, value) in &args.keyword {
            match self.get(name) {
                Some(param)
                    if matches!(
                        param.kind,
                        ParameterKind::PositionalOrKeyword | ParameterKind::KeywordOnly
                    ) =>
                {
                    if values.contains_key(name) {
                        return Err(BindError::MultipleValues {
                            function: function.to_string(),
                            name: name.clone(),
                        });
                    }
                    values.insert(name.clone(), value.clone());
                }
                Some(param)
                    if param.kind == ParameterKind::PositionalOnly
                        && self.var_keyword().is_none() =>
                {
                    return Err(BindError::PositionalOnlyByKeyword {
                        function: function.to_string(),
                        name: name.clone(),
                    });
                }
                _ if self.var_keyword().is_some() => {
                    extra_keyword.insert(name.clone(), value.clone());
                }
                _ => {
                    return Err(BindError::UnexpectedKeyword {
                        function: function.to_string(),
                        name: name.clone(),
                    });
                }
            }
        }

        let mut bound = ValueMap::new();
        for param in &self.parameters {
            let value = match param.kind {
                ParameterKind::VarPositional => Value::List(std::mem::take(&mut extra_positional)),
                ParameterKind::VarKeyword => Value::Map(std::mem::take(&mut extra_keyword)),
                _ => match values.shift_remove(&param.name) {
                    Some(value) => value,
                    None => match &param.default {
                        Some(default) => default.clone(),
                        None => {
                            return Err(BindError::MissingArgument {
                                function: function.to_string(),
                                name: param.name.clone(),
                            });
                        }
                    },
                },
            };
            bound.insert(param.name.clone(), value);
        }

        Ok(BoundArgs {
            function: function.to_string(),
            values: bound,
        })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        let mut first = true;
        let mut sep = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            Ok(())
        };

        let has_var_positional = self.var_positional().is_some();
        let mut keyword_marker_written = false;

        for (i, param) in self.parameters.iter().enumerate() {
            if param.kind == ParameterKind::KeywordOnly
                && !has_var_positional
                && !keyword_marker_written
            {
                sep(f)?;
                write!(f, "*")?;
                keyword_marker_written = true;
            }

            sep(f)?;
            write!(f, "{}", param)?;

            let next_kind = self.parameters.get(i + 1).map(|p| p.kind);
            if param.kind == ParameterKind::PositionalOnly
                && next_kind != Some(ParameterKind::PositionalOnly)
            {
                sep(f)?;
                write!(f, "/")?;
            }
        }
        write!(f, ")")
    }
}

/// Builder for [`Signature`].
#[derive(Debug, Default)]
pub struct SignatureBuilder {
    parameters: Vec<Parameter>,
}

impl SignatureBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter.
    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add a required positional-or-keyword parameter.
    pub fn positional(self, name: impl Into<String>) -> Self {
        self.param(Parameter::new(name, ParameterKind::PositionalOrKeyword))
    }

    /// Add a positional-or-keyword parameter with a default.
    pub fn positional_with_default(
        self,
        name: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        self.param(Parameter::new(name, ParameterKind::PositionalOrKeyword).with_default(default))
    }

    /// Add a required positional-only parameter.
    pub fn positional_only(self, name: impl Into<String>) -> Self {
        self.param(Parameter::new(name, ParameterKind::PositionalOnly))
    }

    /// Add a required keyword-only parameter.
    pub fn keyword_only(self, name: impl Into<String>) -> Self {
        self.param(Parameter::new(name, ParameterKind::KeywordOnly))
    }

    /// Add a keyword-only parameter with a default.
    pub fn keyword_only_with_default(
        self,
        name: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        self.param(Parameter::new(name, ParameterKind::KeywordOnly).with_default(default))
    }

    /// Add the `*args` collector.
    pub fn var_positional(self, name: impl Into<String>) -> Self {
        self.param(Parameter::new(name, ParameterKind::VarPositional))
    }

    /// Add the `**kwargs` collector.
    pub fn var_keyword(self, name: impl Into<String>) -> Self {
        self.param(Parameter::new(name, ParameterKind::VarKeyword))
    }

    /// Validate and build the signature.
    pub fn build(self) -> SignatureResult<Signature> {
        let mut names = HashSet::new();
        let mut previous: Option<ParameterKind> = None;
        let mut seen_positional_default = false;

        for param in &self.parameters {
            if !names.insert(param.name.as_str()) {
                return Err(SignatureError::DuplicateParameter(param.name.clone()));
            }

            if param.kind.is_variadic() && param.default.is_some() {
                return Err(SignatureError::VariadicDefault(param.name.clone()));
            }

            if let Some(after) = previous {
                if param.kind == after && param.kind.is_variadic() {
                    return Err(SignatureError::MultipleVariadic {
                        kind: param.kind,
                        name: param.name.clone(),
                    });
                }
                if param.kind < after {
                    return Err(SignatureError::InvalidOrder {
                        name: param.name.clone(),
                        kind: param.kind,
                        after,
                    });
                }
            }

            if param.kind.accepts_positional() {
                if param.default.is_some() {
                    seen_positional_default = true;
                } else if seen_positional_default {
                    return Err(SignatureError::RequiredAfterDefault(param.name.clone()));
                }
            }

            previous = Some(param.kind);
        }

        Ok(Signature {
            parameters: self.parameters,
        })
    }
}

/// Arguments resolved against a signature, keyed by parameter name.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArgs {
    function: String,
    values: ValueMap,
}

impl BoundArgs {
    /// Get the bound value of a parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// All bound values in declaration order.
    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    /// Consume and return the bound values.
    pub fn into_values(self) -> ValueMap {
        self.values
    }

    /// Get a bound value, failing if the parameter is unknown.
    pub fn require(&self, name: &str) -> CallResult<&Value> {
        self.values.get(name).ok_or_else(|| {
            CallError::Bind(BindError::MissingArgument {
                function: self.function.clone(),
                name: name.to_string(),
            })
        })
    }

    /// Get a bound string.
    pub fn str(&self, name: &str) -> CallResult<&str> {
        let value = self.require(name)?;
        value.as_str().ok_or_else(|| self.mismatch(name, "str", value))
    }

    /// Get a bound integer.
    pub fn int(&self, name: &str) -> CallResult<i64> {
        let value = self.require(name)?;
        value.as_int().ok_or_else(|| self.mismatch(name, "int", value))
    }

    /// Get a bound number, widening integers.
    pub fn float(&self, name: &str) -> CallResult<f64> {
        let value = self.require(name)?;
        value.as_float().ok_or_else(|| self.mismatch(name, "float", value))
    }

    fn mismatch(&self, name: &str, expected: &'static str, actual: &Value) -> CallError {
        CallError::TypeMismatch {
            function: self.function.clone(),
            name: name.to_string(),
            expected,
            actual: actual.type_name(),
        }
    }
}

impl fmt::Display for BoundArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, ")")
    }
}
