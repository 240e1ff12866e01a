//! Configuration steps.
//!
//! A configuration sequence is an ordered list of [`Step`]s. Dynamic callers
//! describe steps as a numeric tag or a name, optionally paired with a payload
//! ([`RawStep`]); decoding it into a [`Step`] is where unsupported tags fail.

use std::fmt;
use std::str::FromStr;

use decorate_core::Value;
use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, ComposeResult};

/// Tag identifying a configuration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum StepTag {
    /// Append the call's positional arguments.
    IncludeArgs = 0,
    /// Merge the call's keyword arguments.
    IncludeKwargs = 1,
    /// Merge declared defaults not already present.
    IncludeDefaults = 2,
    /// Insert the target function at the front.
    PrependFunction = 3,
    /// Append a payload at the end.
    AppendOutput = 4,
}

impl StepTag {
    /// Every supported tag, in numeric order.
    pub const ALL: [StepTag; 5] = [
        StepTag::IncludeArgs,
        StepTag::IncludeKwargs,
        StepTag::IncludeDefaults,
        StepTag::PrependFunction,
        StepTag::AppendOutput,
    ];

    /// Get the step name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepTag::IncludeArgs => "include-args",
            StepTag::IncludeKwargs => "include-kwargs",
            StepTag::IncludeDefaults => "include-defaults",
            StepTag::PrependFunction => "prepend-function",
            StepTag::AppendOutput => "append-output",
        }
    }

    /// Check if the step carries a payload.
    pub fn takes_payload(&self) -> bool {
        matches!(self, StepTag::AppendOutput)
    }
}

impl fmt::Display for StepTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for StepTag {
    type Error = ComposeError;

    fn try_from(tag: u8) -> ComposeResult<Self> {
        StepTag::ALL
            .into_iter()
            .find(|t| *t as u8 == tag)
            .ok_or(ComposeError::UnknownStep(tag))
    }
}

impl FromStr for StepTag {
    type Err = ComposeError;

    fn from_str(s: &str) -> ComposeResult<Self> {
        match s {
            "include-args" | "include-positional" => Ok(StepTag::IncludeArgs),
            "include-kwargs" | "include-keyword" => Ok(StepTag::IncludeKwargs),
            "include-defaults" => Ok(StepTag::IncludeDefaults),
            "prepend-function" => Ok(StepTag::PrependFunction),
            "append-output" => Ok(StepTag::AppendOutput),
            other => Err(ComposeError::UnknownStepName(other.to_string())),
        }
    }
}

/// A single composition step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Append the call's positional arguments, in order.
    IncludeArgs,
    /// Merge the call's keyword arguments, overwriting same-named keys.
    IncludeKwargs,
    /// Merge declared defaults for keys not already present.
    IncludeDefaults,
    /// Insert the target function at index 0.
    PrependFunction,
    /// Append the payload as the last positional argument.
    AppendOutput(Value),
}

impl Step {
    /// The tag of this step.
    pub fn tag(&self) -> StepTag {
        match self {
            Step::IncludeArgs => StepTag::IncludeArgs,
            Step::IncludeKwargs => StepTag::IncludeKwargs,
            Step::IncludeDefaults => StepTag::IncludeDefaults,
            Step::PrependFunction => StepTag::PrependFunction,
            Step::AppendOutput(_) => StepTag::AppendOutput,
        }
    }

    /// The full argument view: positional, keyword, then defaults.
    pub fn inputs() -> Vec<Step> {
        vec![Step::IncludeArgs, Step::IncludeKwargs, Step::IncludeDefaults]
    }

    /// Build a step from a tag and an optional payload.
    pub fn from_tag(tag: StepTag, payload: Option<Value>) -> ComposeResult<Self> {
        match (tag, payload) {
            (StepTag::AppendOutput, Some(value)) => Ok(Step::AppendOutput(value)),
            (StepTag::AppendOutput, None) => Err(ComposeError::MissingPayload(tag.as_str())),
            (_, Some(_)) => Err(ComposeError::UnexpectedPayload(tag.as_str())),
            (StepTag::IncludeArgs, None) => Ok(Step::IncludeArgs),
            (StepTag::IncludeKwargs, None) => Ok(Step::IncludeKwargs),
            (StepTag::IncludeDefaults, None) => Ok(Step::IncludeDefaults),
            (StepTag::PrependFunction, None) => Ok(Step::PrependFunction),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::AppendOutput(value) => write!(f, "{}({})", self.tag(), value),
            _ => write!(f, "{}", self.tag()),
        }
    }
}

/// An undecoded step: a bare tag, or a tag paired with a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RawStep {
    /// A tag without payload.
    Bare(u8),
    /// A tag with its payload.
    WithPayload(u8, Value),
}

impl RawStep {
    /// The numeric tag.
    pub fn tag(&self) -> u8 {
        match self {
            RawStep::Bare(tag) | RawStep::WithPayload(tag, _) => *tag,
        }
    }
}

impl From<u8> for RawStep {
    fn from(tag: u8) -> Self {
        RawStep::Bare(tag)
    }
}

impl From<(u8, Value)> for RawStep {
    fn from((tag, payload): (u8, Value)) -> Self {
        RawStep::WithPayload(tag, payload)
    }
}

impl TryFrom<RawStep> for Step {
    type Error = ComposeError;

    fn try_from(raw: RawStep) -> ComposeResult<Self> {
        match raw {
            RawStep::Bare(tag) => Step::from_tag(StepTag::try_from(tag)?, None),
            RawStep::WithPayload(tag, payload) => {
                Step::from_tag(StepTag::try_from(tag)?, Some(payload))
            }
        }
    }
}

/// Decode raw steps, failing on the first unsupported one.
pub fn decode<I>(raw: I) -> ComposeResult<Vec<Step>>
where
    I: IntoIterator,
    I::Item: Into<RawStep>,
{
    raw.into_iter()
        .map(|r| Step::try_from(r.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_conversions() {
        for tag in StepTag::ALL {
            assert_eq!(StepTag::try_from(tag as u8), Ok(tag));
            assert_eq!(tag.as_str().parse::<StepTag>(), Ok(tag));
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(StepTag::try_from(5u8), Err(ComposeError::UnknownStep(5)));
        assert_eq!(
            "explode".parse::<StepTag>(),
            Err(ComposeError::UnknownStepName("explode".to_string()))
        );
    }

    #[test]
    fn test_name_aliases() {
        assert_eq!(
            "include-positional".parse::<StepTag>(),
            Ok(StepTag::IncludeArgs)
        );
        assert_eq!(
            "include-keyword".parse::<StepTag>(),
            Ok(StepTag::IncludeKwargs)
        );
    }

    #[test]
    fn test_payload_shape() {
        assert_eq!(
            Step::from_tag(StepTag::AppendOutput, None),
            Err(ComposeError::MissingPayload("append-output"))
        );
        assert_eq!(
            Step::from_tag(StepTag::IncludeArgs, Some(Value::Int(1))),
            Err(ComposeError::UnexpectedPayload("include-args"))
        );
        assert_eq!(
            Step::try_from(RawStep::from((4, Value::Int(42)))),
            Ok(Step::AppendOutput(Value::Int(42)))
        );
    }

    #[test]
    fn test_decode_fails_fast() {
        let steps = decode([RawStep::Bare(0), RawStep::Bare(1), RawStep::Bare(2)]).unwrap();
        assert_eq!(steps, Step::inputs());

        let err = decode([RawStep::Bare(0), RawStep::Bare(9)]).unwrap_err();
        assert_eq!(err, ComposeError::UnknownStep(9));
    }

    #[test]
    fn test_display() {
        assert_eq!(Step::PrependFunction.to_string(), "prepend-function");
        assert_eq!(
            Step::AppendOutput(Value::Int(42)).to_string(),
            "append-output(42)"
        );
    }
}
