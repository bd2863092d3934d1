use super::schema::TaskDefinition;
use crate::error::TaskConversionError;

/// A trait for custom data models that can be converted into a `TaskDefinition`.
///
/// This is the extension point for hosts that describe their assessments in
/// their own format. Implement it on your configuration structs to hand the
/// compiler a canonical definition.
///
/// # Example
///
/// ```rust,no_run
/// use stepwise::prelude::*;
/// use stepwise::error::TaskConversionError;
///
/// struct MyScreen { name: String, intro: bool }
/// struct MyAssessment { name: String, screens: Vec<MyScreen> }
///
/// impl IntoTask for MyAssessment {
///     fn into_task(self) -> Result<TaskDefinition, TaskConversionError> {
///         let nodes = self
///             .screens
///             .into_iter()
///             .map(|s| NodeDefinition::Step(StepDefinition {
///                 id: s.name,
///                 first_run_only: s.intro,
///             }))
///             .collect();
///         Ok(TaskDefinition { id: self.name, nodes })
///     }
/// }
/// ```
pub trait IntoTask {
    /// Consumes the object and converts it into a compilable task definition.
    fn into_task(self) -> Result<TaskDefinition, TaskConversionError>;
}

impl IntoTask for TaskDefinition {
    fn into_task(self) -> Result<TaskDefinition, TaskConversionError> {
        Ok(self)
    }
}
