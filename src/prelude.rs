//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the stepwise
//! crate. Import it to get the core functionality without importing each type
//! individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use stepwise::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let task_json = std::fs::read_to_string("path/to/task.json")?;
//! let task = Compiler::from_json(&task_json)?.compile()?;
//! let navigator = Navigator::new(task);
//!
//! let history = AnswerHistory::from_file("path/to/history.json")?;
//! let route = navigator.route(&history);
//! println!("Route has {} steps", route.len());
//! # Ok(())
//! # }
//! ```

// Compilation and navigation
pub use crate::compiler::{Compiler, CompilerBuilder, DEFAULT_FIRST_RUN_KEY};
pub use crate::navigator::{
    After, Before, Cursor, CursorState, Navigator, Outcome, Progress, TaskResult, TaskRun,
};

// Task model
pub use crate::task::{AnswerValue, Condition, Section, Step, Task, TaskNode};

// Definitions and conversion
pub use crate::definition::{
    ConditionDefinition, IntoTask, NodeDefinition, SectionDefinition, StepDefinition,
    TaskArtifact, TaskDefinition,
};

// History
pub use crate::history::{Answer, AnswerHistory, HistoryView};

// Error types
pub use crate::error::{ArtifactError, NavigationError, TaskBuildError, TaskConversionError};

// Trace formatting
pub use crate::trace::{Decision, RouteTrace, TraceFormatter};

// Result type alias for convenience
pub type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;
