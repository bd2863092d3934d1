use super::{Cursor, CursorState, Navigator, Outcome};
use crate::error::NavigationError;
use crate::history::{Answer, AnswerHistory};
use crate::task::{AnswerValue, Step};
use serde::{Deserialize, Serialize};

/// What the host should present after an answer was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'n> {
    Next(&'n Step),
    Completed,
}

/// The single value a finished (or abandoned) run hands back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub task_id: String,
    pub outcome: Outcome,
    pub answers: Vec<Answer>,
    /// The route implied by the final answers.
    pub route: Vec<String>,
}

impl TaskResult {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Drives one traversal of a task: records answers for the presented step
/// and moves the cursor accordingly.
#[derive(Debug, Clone)]
pub struct TaskRun<'n> {
    navigator: &'n Navigator,
    cursor: Cursor<'n>,
    history: AnswerHistory,
}

impl<'n> TaskRun<'n> {
    pub fn new(navigator: &'n Navigator) -> Self {
        Self::with_history(navigator, AnswerHistory::new())
    }

    /// Starts from answers the host already knows, such as the first-run flag.
    pub fn with_history(navigator: &'n Navigator, history: AnswerHistory) -> Self {
        Self {
            navigator,
            cursor: Cursor::new(navigator),
            history,
        }
    }

    pub fn history(&self) -> &AnswerHistory {
        &self.history
    }

    pub fn state(&self) -> &CursorState {
        self.cursor.state()
    }

    pub fn current(&self) -> Option<&'n Step> {
        self.cursor.current_step()
    }

    /// Presents the first step. Returns `Completed` for a task with no
    /// applicable steps.
    pub fn start(&mut self) -> Result<Progress<'n>, NavigationError> {
        self.cursor.advance(&self.history)?;
        Ok(self.progress())
    }

    /// Records `value` for the current step and moves forward.
    ///
    /// The answer is kept only if the move succeeds; on error the history
    /// and the cursor are left as they were.
    pub fn answer(
        &mut self,
        value: impl Into<AnswerValue>,
    ) -> Result<Progress<'n>, NavigationError> {
        let step = self.current().ok_or_else(|| match self.cursor.state() {
            CursorState::Completed => NavigationError::AlreadyCompleted,
            _ => NavigationError::NoCurrentStep,
        })?;
        let mut history = self.history.clone();
        history.record(&step.id, value);
        self.cursor.advance(&history)?;
        self.history = history;
        Ok(self.progress())
    }

    /// Returns to the previous step. `None` means the run is back before
    /// the first step.
    pub fn back(&mut self) -> Result<Option<&'n Step>, NavigationError> {
        self.cursor.retreat(&self.history)?;
        Ok(self.current())
    }

    /// Ends a completed run.
    pub fn finish(self) -> Result<TaskResult, NavigationError> {
        if !self.cursor.is_completed() {
            return Err(NavigationError::NotCompleted);
        }
        Ok(build_result(self.navigator, self.history, Outcome::Completed))
    }

    /// Ends the run early, keeping whatever was answered so far.
    pub fn abandon(self) -> TaskResult {
        let Self {
            navigator,
            cursor,
            history,
        } = self;
        build_result(navigator, history, cursor.abandon())
    }

    fn progress(&self) -> Progress<'n> {
        match self.current() {
            Some(step) => Progress::Next(step),
            None => Progress::Completed,
        }
    }
}

fn build_result(navigator: &Navigator, history: AnswerHistory, outcome: Outcome) -> TaskResult {
    let route = navigator
        .route(&history)
        .into_iter()
        .map(|s| s.id.clone())
        .collect();
    tracing::info!(
        task = %navigator.task().id(),
        outcome = ?outcome,
        answers = history.len(),
        "Task run ended"
    );
    TaskResult {
        task_id: navigator.task().id().to_string(),
        outcome,
        answers: history.answers().to_vec(),
        route,
    }
}
