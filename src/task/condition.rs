use crate::history::HistoryView;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The applicability condition of a section, evaluated against the answer history.
///
/// A section is visited only when its condition resolves to `Some(true)`. Any
/// other outcome, including an unresolved key, skips the section as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// The latest answer for `key` includes `tag` (see `AnswerValue::includes`).
    Includes { key: String, tag: String },
    /// The latest answer for `key` is exactly `value` in its canonical text form.
    Equals { key: String, value: String },
    Not(Box<Condition>),
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl Condition {
    pub fn includes(key: &str, tag: &str) -> Self {
        Condition::Includes {
            key: key.to_string(),
            tag: tag.to_string(),
        }
    }

    pub fn equals(key: &str, value: &str) -> Self {
        Condition::Equals {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Evaluates the condition with three-valued logic.
    ///
    /// `None` means a key the condition depends on has no recorded answer.
    pub fn evaluate(&self, history: &HistoryView<'_>) -> Option<bool> {
        match self {
            Condition::Includes { key, tag } => history.lookup(key).map(|v| v.includes(tag)),
            Condition::Equals { key, value } => history.lookup(key).map(|v| v.is_exactly(value)),
            Condition::Not(inner) => inner.evaluate(history).map(|b| !b),
            Condition::All(conditions) => {
                let mut unresolved = false;
                for condition in conditions {
                    match condition.evaluate(history) {
                        Some(false) => return Some(false),
                        None => unresolved = true,
                        Some(true) => {}
                    }
                }
                if unresolved { None } else { Some(true) }
            }
            Condition::Any(conditions) => {
                let mut unresolved = false;
                for condition in conditions {
                    match condition.evaluate(history) {
                        Some(true) => return Some(true),
                        None => unresolved = true,
                        Some(false) => {}
                    }
                }
                if unresolved { None } else { Some(false) }
            }
        }
    }

    /// Collects every answer key the condition branches on.
    pub fn get_required_keys<'a>(&'a self, keys: &mut Vec<&'a str>) {
        match self {
            Condition::Includes { key, .. } | Condition::Equals { key, .. } => {
                if !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
            Condition::Not(inner) => inner.get_required_keys(keys),
            Condition::All(conditions) | Condition::Any(conditions) => {
                for condition in conditions {
                    condition.get_required_keys(keys);
                }
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Includes { key, tag } => write!(f, "{} includes \"{}\"", key, tag),
            Condition::Equals { key, value } => write!(f, "{} == \"{}\"", key, value),
            Condition::Not(inner) => write!(f, "NOT ({})", inner),
            Condition::All(conditions) => fmt_joined(f, conditions, " AND "),
            Condition::Any(conditions) => fmt_joined(f, conditions, " OR "),
        }
    }
}

fn fmt_joined(f: &mut fmt::Formatter<'_>, conditions: &[Condition], sep: &str) -> fmt::Result {
    write!(f, "({})", conditions.iter().join(sep))
}
