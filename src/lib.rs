//! # Stepwise - Conditional Step Navigation for Assessment Flows
//!
//! **Stepwise** decides which step of an assessment to present next. A task is an
//! ordered list of steps and sections; sections are visited or skipped as a unit
//! depending on earlier answers, and steps can be limited to a participant's first
//! run. Navigation is a pure function of the task and the answer history, so the
//! host can ask forward and backward questions at any time without hidden state.
//!
//! ## Core Workflow
//!
//! 1.  **Describe the Task**: Write a `TaskDefinition` (usually JSON), or implement
//!     `IntoTask` for your own format.
//! 2.  **Compile**: Use `Compiler::builder` to validate identifiers and branching keys
//!     and produce an immutable `Task`.
//! 3.  **Navigate**: Wrap the task in a `Navigator` and call `step_after` /
//!     `step_before` with the current `AnswerHistory`, or let a `TaskRun` drive the
//!     traversal and hand back a single `TaskResult`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stepwise::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let task_json = r#"{
//!         "id": "tapping",
//!         "nodes": [
//!             { "type": "step", "id": "overview" },
//!             { "type": "step", "id": "handSelection" },
//!             { "type": "section", "id": "left",
//!               "skipUnless": { "type": "includes", "key": "handSelection", "value": "left" },
//!               "steps": [{ "id": "leftActive" }] },
//!             { "type": "section", "id": "right",
//!               "skipUnless": { "type": "includes", "key": "handSelection", "value": "right" },
//!               "steps": [{ "id": "rightActive" }] },
//!             { "type": "step", "id": "completion" }
//!         ]
//!     }"#;
//!
//!     let task = Compiler::from_json(task_json)?.compile()?;
//!     let navigator = Navigator::new(task);
//!
//!     let mut history = AnswerHistory::new();
//!     history.record("overview", true);
//!     history.record("handSelection", "right");
//!
//!     match navigator.step_after(Some("handSelection"), &history)? {
//!         After::Step(step) => println!("-> Next step: {}", step.id),
//!         After::Terminal => println!("-> Task complete"),
//!     }
//!
//!     let trace = navigator.explain(&history);
//!     println!("{}", TraceFormatter::format_trace(&trace));
//!     Ok(())
//! }
//! ```

pub mod compiler;
pub mod definition;
pub mod error;
pub mod history;
pub mod navigator;
pub mod prelude;
pub mod task;
pub mod trace;
