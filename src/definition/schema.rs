use serde::{Deserialize, Serialize};

/// The canonical, external definition of a task, ready for compilation.
/// This is the target structure for any custom format conversion and the
/// shape of task JSON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub id: String,
    #[serde(default)]
    pub nodes: Vec<NodeDefinition>,
}

/// A top-level entry: either a plain step or a section of steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeDefinition {
    Step(StepDefinition),
    Section(SectionDefinition),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDefinition {
    pub id: String,
    #[serde(default, alias = "firstRunOnly")]
    pub first_run_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDefinition {
    pub id: String,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
    #[serde(default, alias = "skipUnless")]
    pub skip_unless: Option<ConditionDefinition>,
}

/// An untyped condition as written in configuration. The `condition_type`
/// selects the parser that turns it into a `Condition`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionDefinition {
    #[serde(rename = "type")]
    pub condition_type: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub conditions: Vec<ConditionDefinition>,
}

impl StepDefinition {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            first_run_only: false,
        }
    }
}

impl ConditionDefinition {
    /// A leaf condition such as `includes` or `equals`.
    pub fn leaf(condition_type: &str, key: &str, value: &str) -> Self {
        Self {
            condition_type: condition_type.to_string(),
            key: Some(key.to_string()),
            value: Some(value.to_string()),
            conditions: Vec::new(),
        }
    }

    /// A composite condition such as `not`, `all` or `any`.
    pub fn composite(condition_type: &str, conditions: Vec<ConditionDefinition>) -> Self {
        Self {
            condition_type: condition_type.to_string(),
            key: None,
            value: None,
            conditions,
        }
    }
}
