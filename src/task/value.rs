use serde::{Deserialize, Serialize};
use std::fmt;

/// A recorded answer value, as produced by the host when a step completes.
///
/// JSON values map directly onto the variants: booleans, numbers, strings,
/// arrays of strings (multiple choice) and `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Choices(Vec<String>),
    Null,
}

impl AnswerValue {
    /// Returns `true` if this value selects `tag`.
    ///
    /// Text matches when equal to the tag, a choice list when it contains it.
    /// Booleans and numbers are compared by their display form.
    pub fn includes(&self, tag: &str) -> bool {
        match self {
            AnswerValue::Text(text) => text == tag,
            AnswerValue::Choices(choices) => choices.iter().any(|c| c == tag),
            AnswerValue::Bool(_) | AnswerValue::Number(_) => self.to_string() == tag,
            AnswerValue::Null => false,
        }
    }

    /// Returns `true` if this value is exactly `expected` in canonical text form.
    ///
    /// A choice list matches only when it holds that single choice.
    pub fn is_exactly(&self, expected: &str) -> bool {
        match self {
            AnswerValue::Text(text) => text == expected,
            AnswerValue::Choices(choices) => choices.len() == 1 && choices[0] == expected,
            AnswerValue::Bool(_) | AnswerValue::Number(_) => self.to_string() == expected,
            AnswerValue::Null => expected == "null",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            AnswerValue::Bool(b) => write!(f, "{}", b),
            AnswerValue::Text(s) => write!(f, "\"{}\"", s),
            AnswerValue::Choices(choices) => write!(f, "[{}]", choices.join(", ")),
            AnswerValue::Null => write!(f, "null"),
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(value: Vec<String>) -> Self {
        AnswerValue::Choices(value)
    }
}
