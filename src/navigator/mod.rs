//! Forward and backward traversal over a task's sections and steps.
//!
//! The navigator is a pure function of the task, the answer history and the
//! step being left. It never mutates the history and keeps no hidden state,
//! so asking the same question twice always yields the same answer.

use crate::error::NavigationError;
use crate::history::{AnswerHistory, HistoryView};
use crate::task::{Section, Step, Task, TaskNode};
use crate::trace::{Decision, RouteTrace, StepDecision};

mod cursor;
mod run;

pub use cursor::{Cursor, CursorState, Outcome};
pub use run::{Progress, TaskResult, TaskRun};

/// The result of a forward request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum After<'t> {
    Step(&'t Step),
    Terminal,
}

/// The result of a backward request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Before<'t> {
    Step(&'t Step),
    Start,
}

/// Computes which step to present next (or previously) for a `Task`.
#[derive(Debug, Clone)]
pub struct Navigator {
    task: Task,
}

impl Navigator {
    pub fn new(task: Task) -> Self {
        Self { task }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    /// Flattens the task into the steps that apply under `history`.
    ///
    /// Sections whose condition does not resolve to `true` are dropped as a
    /// unit. First-run-only steps are dropped when the first-run answer is
    /// `false`; a missing or non-boolean answer keeps them.
    pub fn route<'h>(&self, history: impl Into<HistoryView<'h>>) -> Vec<&Step> {
        let view = history.into();
        let first_run = self.is_first_run(&view);
        let mut route = Vec::with_capacity(self.task.step_count());

        for node in self.task.nodes() {
            let steps: &[Step] = match node {
                TaskNode::Step(step) => std::slice::from_ref(step),
                TaskNode::Section(section) => {
                    if Self::section_applies(section, &view) != Some(true) {
                        tracing::trace!(section = %section.id, "Section skipped");
                        continue;
                    }
                    &section.steps
                }
            };
            route.extend(steps.iter().filter(|s| first_run || !s.first_run_only));
        }
        route
    }

    /// Returns the step to present after `current`, or `Terminal` when the
    /// route is exhausted. `None` asks for the first step.
    ///
    /// `history` must include the answer just recorded for `current`.
    pub fn step_after(
        &self,
        current: Option<&str>,
        history: &AnswerHistory,
    ) -> Result<After<'_>, NavigationError> {
        let route = self.route(history.view());
        let next = match current {
            None => route.first(),
            Some(id) => {
                let position = self.position_on(&route, id)?;
                route.get(position + 1)
            }
        };

        let after = match next {
            Some(step) => After::Step(step),
            None => After::Terminal,
        };
        tracing::debug!(from = ?current, to = ?after_id(&after), "Forward navigation");
        Ok(after)
    }

    /// Returns the step presented before `current`, or `Start` when `current`
    /// is the first step of its route.
    ///
    /// The route is rebuilt from the history as it stood before `current`
    /// was answered, so backward traversal reproduces the forward decisions.
    /// Once a key the route depends on has been answered again after that
    /// point, forward navigation already follows the newer answer and so
    /// does this.
    pub fn step_before(
        &self,
        current: Option<&str>,
        history: &AnswerHistory,
    ) -> Result<Before<'_>, NavigationError> {
        let id = current.ok_or(NavigationError::BeforeStart)?;
        let view = if history.answered_since(id, &self.task.decision_keys()) {
            tracing::trace!(step = %id, "Route keys changed since step was answered");
            history.view()
        } else {
            history.view_before(id)
        };
        let route = self.route(view);
        let position = self.position_on(&route, id)?;

        let before = match position.checked_sub(1).and_then(|p| route.get(p)) {
            Some(step) => Before::Step(step),
            None => Before::Start,
        };
        tracing::debug!(from = %id, to = ?before_id(&before), "Backward navigation");
        Ok(before)
    }

    /// Explains, step by step, how the route for `history` was derived.
    pub fn explain(&self, history: &AnswerHistory) -> RouteTrace {
        let view = history.view();
        let first_run = self.is_first_run(&view);
        let mut decisions = Vec::with_capacity(self.task.step_count());

        for node in self.task.nodes() {
            match node {
                TaskNode::Step(step) => {
                    decisions.push(self.step_decision(step, first_run));
                }
                TaskNode::Section(section) => {
                    let resolved = Self::section_applies(section, &view);
                    match (&section.skip_unless, resolved) {
                        (Some(condition), r) if r != Some(true) => {
                            tracing::debug!(
                                section = %section.id,
                                condition = %condition,
                                resolved = ?r,
                                "Section skipped"
                            );
                            decisions.extend(section.steps.iter().map(|step| StepDecision {
                                step_id: step.id.clone(),
                                decision: Decision::SectionSkipped {
                                    section_id: section.id.clone(),
                                    condition: condition.clone(),
                                    resolved: r,
                                },
                            }));
                        }
                        _ => decisions.extend(
                            section
                                .steps
                                .iter()
                                .map(|step| self.step_decision(step, first_run)),
                        ),
                    }
                }
            }
        }
        RouteTrace { decisions }
    }

    fn step_decision(&self, step: &Step, first_run: bool) -> StepDecision {
        let decision = if step.first_run_only && !first_run {
            Decision::FirstRunExcluded {
                key: self.task.first_run_key().to_string(),
            }
        } else {
            Decision::Included
        };
        StepDecision {
            step_id: step.id.clone(),
            decision,
        }
    }

    /// `None` when the section's condition cannot be resolved yet.
    fn section_applies(section: &Section, view: &HistoryView<'_>) -> Option<bool> {
        match &section.skip_unless {
            Some(condition) => condition.evaluate(view),
            None => Some(true),
        }
    }

    fn is_first_run(&self, view: &HistoryView<'_>) -> bool {
        view.lookup(self.task.first_run_key())
            .and_then(|v| v.as_bool())
            .unwrap_or(true)
    }

    fn position_on(&self, route: &[&Step], id: &str) -> Result<usize, NavigationError> {
        if !self.task.contains_step(id) {
            return Err(NavigationError::UnknownStep(id.to_string()));
        }
        route
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| NavigationError::StepNotOnRoute(id.to_string()))
    }
}

fn after_id<'a>(after: &After<'a>) -> Option<&'a str> {
    match after {
        After::Step(step) => Some(step.id.as_str()),
        After::Terminal => None,
    }
}

fn before_id<'a>(before: &Before<'a>) -> Option<&'a str> {
    match before {
        Before::Step(step) => Some(step.id.as_str()),
        Before::Start => None,
    }
}
