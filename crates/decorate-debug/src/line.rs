//! Debug line formatting.

use std::fmt;

use chrono::{DateTime, Local};
use uuid::Uuid;

use decorate_core::{CallArgs, Value};

/// Timestamp layout of every debug line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Identifier tying the input and output lines of one call together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallId(Uuid);

impl CallId {
    /// Create a new random call ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a debug line reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The function is being called.
    Call,
    /// The function returned.
    Return,
}

impl Action {
    /// Get the action label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Call => "CALL",
            Action::Return => "RETURN",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a timestamp the way debug lines carry it.
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// The current local time, formatted.
pub fn now() -> String {
    format_timestamp(&Local::now())
}

/// `<timestamp> | [CALL] '<name>' | args=(..) | kwargs={..}`
pub fn call_line(timestamp: &str, name: &str, composed: &CallArgs) -> String {
    format!(
        "{} | [{}] '{}' | args={} | kwargs={}",
        timestamp,
        Action::Call,
        name,
        composed.positional_display(),
        composed.keyword_display()
    )
}

/// `<timestamp> | [RETURN] '<name>' | output=<value>`
///
/// A string output is written as its raw text; anything else uses the value's
/// display form.
pub fn return_line(timestamp: &str, name: &str, output: &Value) -> String {
    let rendered = match output {
        Value::Str(text) => text.clone(),
        other => other.to_string(),
    };
    format!("{} | [{}] '{}' | output={}", timestamp, Action::Return, name, rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const TS: &str = "2021-02-05T17:36:53.276937";

    #[test]
    fn test_call_line() {
        let composed = CallArgs::new().arg("World").kwarg("punctuation", "!");
        assert_eq!(
            call_line(TS, "hello", &composed),
            "2021-02-05T17:36:53.276937 | [CALL] 'hello' | args=('World',) | kwargs={'punctuation': '!'}"
        );
    }

    #[test]
    fn test_call_line_empty() {
        assert_eq!(
            call_line(TS, "f", &CallArgs::new()),
            "2021-02-05T17:36:53.276937 | [CALL] 'f' | args=() | kwargs={}"
        );
    }

    #[test]
    fn test_return_line() {
        assert_eq!(
            return_line(TS, "hello", &Value::from("Hello, World!")),
            "2021-02-05T17:36:53.276937 | [RETURN] 'hello' | output=Hello, World!"
        );
        assert_eq!(
            return_line(TS, "lst", &Value::List(vec![Value::from("a")])),
            "2021-02-05T17:36:53.276937 | [RETURN] 'lst' | output=['a']"
        );
        assert_eq!(
            return_line(TS, "f", &Value::None),
            "2021-02-05T17:36:53.276937 | [RETURN] 'f' | output=None"
        );
    }

    #[test]
    fn test_timestamp_format() {
        let at = Local
            .with_ymd_and_hms(2021, 2, 5, 17, 36, 53)
            .single()
            .unwrap();
        assert_eq!(format_timestamp(&at), "2021-02-05T17:36:53.000000");
    }

    #[test]
    fn test_call_ids_are_unique() {
        assert_ne!(CallId::new(), CallId::new());
    }
}
