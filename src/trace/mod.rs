mod formatter;

pub use formatter::TraceFormatter;

use crate::task::Condition;

/// Why a step did or did not make it onto the route.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Included,
    /// The enclosing section was skipped. `resolved` is `None` when a key
    /// the condition needs has no answer yet.
    SectionSkipped {
        section_id: String,
        condition: Condition,
        resolved: Option<bool>,
    },
    /// A first-run-only step dropped because the first-run answer is `false`.
    FirstRunExcluded { key: String },
}

/// The decision taken for one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDecision {
    pub step_id: String,
    pub decision: Decision,
}

/// A record of how a route was derived from a history, one entry per step
/// in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTrace {
    pub decisions: Vec<StepDecision>,
}

impl RouteTrace {
    /// The identifiers of the included steps, in route order.
    pub fn route(&self) -> Vec<&str> {
        self.decisions
            .iter()
            .filter(|d| d.decision == Decision::Included)
            .map(|d| d.step_id.as_str())
            .collect()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &StepDecision> {
        self.decisions
            .iter()
            .filter(|d| d.decision != Decision::Included)
    }
}
