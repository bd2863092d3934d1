use thiserror::Error;

/// Errors that can occur while turning a task definition into a runnable `Task`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskBuildError {
    #[error("Failed to parse task definition JSON: {0}")]
    InvalidDefinition(String),

    #[error("Identifier '{0}' is declared more than once in the task")]
    DuplicateIdentifier(String),

    #[error("The task has an empty identifier")]
    EmptyTaskId,

    #[error("A node inside '{parent}' has an empty identifier")]
    EmptyIdentifier { parent: String },

    #[error(
        "Section '{section_id}' branches on '{key}', which is neither a step declared before it nor an external key"
    )]
    UnknownBranchingKey { section_id: String, key: String },

    #[error("Section '{section_id}' uses an unregistered condition type: '{type_name}'")]
    InvalidConditionType {
        section_id: String,
        type_name: String,
    },

    #[error("Condition '{type_name}' in section '{section_id}' is malformed: {message}")]
    MalformedCondition {
        section_id: String,
        type_name: String,
        message: String,
    },
}

/// Errors reported by the navigator when it is asked to do something the
/// traversal state machine does not allow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Step '{0}' does not exist in this task")]
    UnknownStep(String),

    #[error("Step '{0}' is not on the route selected by the current answers")]
    StepNotOnRoute(String),

    #[error("Cannot navigate backward: the task has not started")]
    BeforeStart,

    #[error("Cannot navigate: the task is already completed")]
    AlreadyCompleted,

    #[error("No step is currently presented")]
    NoCurrentStep,

    #[error("The task has not reached its final step")]
    NotCompleted,
}

/// Errors that can occur when converting a custom user format into a `TaskDefinition`.
#[derive(Error, Debug, Clone)]
pub enum TaskConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Errors raised while saving or loading a compiled task artifact.
#[derive(Error, Debug, Clone)]
pub enum ArtifactError {
    #[error("Artifact error: {0}")]
    Generic(String),
}
