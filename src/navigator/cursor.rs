use super::{After, Before, Navigator};
use crate::error::NavigationError;
use crate::history::AnswerHistory;
use crate::task::Step;

/// Where a traversal currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorState {
    NotStarted,
    AtStep(String),
    Completed,
}

/// How a traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Completed,
    Abandoned,
}

/// The navigation state machine for one traversal of a task.
///
/// Forward: `NotStarted -> AtStep | Completed`, `AtStep -> AtStep | Completed`.
/// Backward: `AtStep -> AtStep | NotStarted`. Nothing else is allowed.
#[derive(Debug, Clone)]
pub struct Cursor<'n> {
    navigator: &'n Navigator,
    state: CursorState,
}

impl<'n> Cursor<'n> {
    pub fn new(navigator: &'n Navigator) -> Self {
        Self {
            navigator,
            state: CursorState::NotStarted,
        }
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    /// The step currently presented, if any.
    pub fn current_step(&self) -> Option<&'n Step> {
        match &self.state {
            CursorState::AtStep(id) => self.navigator.task().step(id),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == CursorState::Completed
    }

    /// Moves forward using `history`, which must include the answer to the
    /// current step.
    pub fn advance(&mut self, history: &AnswerHistory) -> Result<&CursorState, NavigationError> {
        let navigator = self.navigator;
        let after = match &self.state {
            CursorState::NotStarted => navigator.step_after(None, history)?,
            CursorState::AtStep(id) => navigator.step_after(Some(id.as_str()), history)?,
            CursorState::Completed => return Err(NavigationError::AlreadyCompleted),
        };
        self.state = match after {
            After::Step(step) => CursorState::AtStep(step.id.clone()),
            After::Terminal => CursorState::Completed,
        };
        Ok(&self.state)
    }

    /// Moves back to the previously presented step, or to `NotStarted`.
    pub fn retreat(&mut self, history: &AnswerHistory) -> Result<&CursorState, NavigationError> {
        let navigator = self.navigator;
        let before = match &self.state {
            CursorState::NotStarted => return Err(NavigationError::BeforeStart),
            CursorState::AtStep(id) => navigator.step_before(Some(id.as_str()), history)?,
            CursorState::Completed => return Err(NavigationError::AlreadyCompleted),
        };
        self.state = match before {
            Before::Step(step) => CursorState::AtStep(step.id.clone()),
            Before::Start => CursorState::NotStarted,
        };
        Ok(&self.state)
    }

    /// Discards the cursor. Abandonment is terminal but distinct from completion.
    pub fn abandon(self) -> Outcome {
        tracing::debug!(state = ?self.state, "Traversal abandoned");
        Outcome::Abandoned
    }
}
