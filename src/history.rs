//! The append-only record of answers collected while a task runs.
//!
//! The host owns the `AnswerHistory` and records one `Answer` per completed
//! step. Navigation only ever reads it through a `HistoryView`, which is a
//! borrowed snapshot of some prefix of the history.

use crate::task::AnswerValue;
use serde::{Deserialize, Serialize};
use std::fs;

/// A single recorded result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub identifier: String,
    pub value: AnswerValue,
}

/// Ordered answers in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerHistory {
    answers: Vec<Answer>,
}

impl AnswerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a history from a JSON array of `{ "identifier", "value" }` objects.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let history = serde_json::from_str(&content)?;
        Ok(history)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Appends an answer. Earlier entries are never modified.
    pub fn record(&mut self, identifier: &str, value: impl Into<AnswerValue>) {
        self.answers.push(Answer {
            identifier: identifier.to_string(),
            value: value.into(),
        });
    }

    /// Builder-style variant of `record`, handy for seeding host answers.
    pub fn with(mut self, identifier: &str, value: impl Into<AnswerValue>) -> Self {
        self.record(identifier, value);
        self
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// The latest answer recorded for `identifier`.
    pub fn lookup(&self, identifier: &str) -> Option<&AnswerValue> {
        self.view().lookup(identifier)
    }

    /// A view over the whole history.
    pub fn view(&self) -> HistoryView<'_> {
        HistoryView {
            answers: &self.answers,
        }
    }

    /// A view over the entries recorded before the latest answer to `identifier`.
    ///
    /// If `identifier` was never answered the whole history is visible.
    pub fn view_before(&self, identifier: &str) -> HistoryView<'_> {
        let end = self
            .answers
            .iter()
            .rposition(|a| a.identifier == identifier)
            .unwrap_or(self.answers.len());
        HistoryView {
            answers: &self.answers[..end],
        }
    }

    /// Whether any of `keys` was answered after the latest answer to
    /// `identifier`. False when `identifier` was never answered.
    pub fn answered_since(&self, identifier: &str, keys: &[&str]) -> bool {
        match self.answers.iter().rposition(|a| a.identifier == identifier) {
            Some(start) => self.answers[start + 1..]
                .iter()
                .any(|a| keys.contains(&a.identifier.as_str())),
            None => false,
        }
    }
}

/// A read-only snapshot of a history prefix.
#[derive(Debug, Clone, Copy)]
pub struct HistoryView<'a> {
    answers: &'a [Answer],
}

impl<'a> HistoryView<'a> {
    pub fn lookup(&self, identifier: &str) -> Option<&'a AnswerValue> {
        self.answers
            .iter()
            .rev()
            .find(|a| a.identifier == identifier)
            .map(|a| &a.value)
    }

    pub fn answers(&self) -> &'a [Answer] {
        self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<'a> From<&'a AnswerHistory> for HistoryView<'a> {
    fn from(history: &'a AnswerHistory) -> Self {
        history.view()
    }
}
