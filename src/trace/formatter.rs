use super::{Decision, RouteTrace, StepDecision};
use itertools::Itertools;

/// Formats route traces into human-readable explanations
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format a route trace as one line per step.
    pub fn format_trace(trace: &RouteTrace) -> String {
        if trace.decisions.is_empty() {
            return "(empty task)".to_string();
        }
        trace.decisions.iter().map(Self::format_decision).join("\n")
    }

    /// Format only the route, e.g. `overview -> instruction -> completion`.
    pub fn format_route(trace: &RouteTrace) -> String {
        let route = trace.route();
        if route.is_empty() {
            "(no steps)".to_string()
        } else {
            route.iter().join(" -> ")
        }
    }

    fn format_decision(entry: &StepDecision) -> String {
        match &entry.decision {
            Decision::Included => format!("+ {}", entry.step_id),
            Decision::SectionSkipped {
                section_id,
                condition,
                resolved,
            } => {
                let reason = match resolved {
                    Some(_) => format!("{} is false", condition),
                    None => format!("{} is unresolved", condition),
                };
                format!(
                    "- {}: skipped with section '{}' ({})",
                    entry.step_id, section_id, reason
                )
            }
            Decision::FirstRunExcluded { key } => {
                format!("- {}: first run only ({} is false)", entry.step_id, key)
            }
        }
    }
}
