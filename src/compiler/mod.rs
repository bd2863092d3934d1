use crate::definition::{IntoTask, TaskDefinition};
use crate::error::TaskBuildError;
use crate::task::Task;
use ahash::{AHashMap, AHashSet};

mod builder;
mod optimizer;
pub mod parsing;

use builder::NodeBuilder;
use parsing::*;

/// The answer key consulted for first-run-only steps unless configured otherwise.
pub const DEFAULT_FIRST_RUN_KEY: &str = "isFirstRun";

/// Turns a `TaskDefinition` into an immutable, validated `Task`.
pub struct Compiler {
    definition: TaskDefinition,
    registry: AHashMap<String, Box<dyn ConditionParser>>,
    external_keys: AHashSet<String>,
    first_run_key: String,
}

pub struct CompilerBuilder {
    definition: TaskDefinition,
    registry: AHashMap<String, Box<dyn ConditionParser>>,
    external_keys: AHashSet<String>,
    first_run_key: String,
}

impl CompilerBuilder {
    pub fn new(definition: TaskDefinition) -> Self {
        let mut registry: AHashMap<String, Box<dyn ConditionParser>> = AHashMap::new();
        register_default_parsers(&mut registry);
        Self {
            definition,
            registry,
            external_keys: AHashSet::new(),
            first_run_key: DEFAULT_FIRST_RUN_KEY.to_string(),
        }
    }

    /// Lets configuration use `user_type_name` for a built-in condition type.
    pub fn with_condition_alias(mut self, user_type_name: &str, builtin_type_name: &str) -> Self {
        if let Some(parser) = create_parser_by_name(builtin_type_name) {
            self.registry.insert(user_type_name.to_string(), parser);
        }
        self
    }

    pub fn with_custom_parser(mut self, parser: Box<dyn ConditionParser>) -> Self {
        self.registry
            .insert(parser.condition_type().to_string(), parser);
        self
    }

    /// Declares an answer key the host records itself rather than through a step.
    pub fn with_external_key(mut self, key: &str) -> Self {
        self.external_keys.insert(key.to_string());
        self
    }

    pub fn with_first_run_key(mut self, key: &str) -> Self {
        self.first_run_key = key.to_string();
        self
    }

    pub fn build(self) -> Compiler {
        let mut external_keys = self.external_keys;
        external_keys.insert(self.first_run_key.clone());
        Compiler {
            definition: self.definition,
            registry: self.registry,
            external_keys,
            first_run_key: self.first_run_key,
        }
    }
}

impl Compiler {
    pub fn builder(definition: TaskDefinition) -> CompilerBuilder {
        CompilerBuilder::new(definition)
    }

    /// Creates a compiler with default settings from task JSON.
    pub fn from_json(task_json: &str) -> Result<Self, TaskBuildError> {
        let definition: TaskDefinition = serde_json::from_str(task_json)
            .map_err(|e| TaskBuildError::InvalidDefinition(e.to_string()))?;
        Ok(Self::builder(definition).build())
    }

    /// Creates a compiler builder from any custom format implementing `IntoTask`.
    pub fn from_custom<T: IntoTask>(source: T) -> Result<CompilerBuilder, TaskBuildError> {
        let definition = source
            .into_task()
            .map_err(|e| TaskBuildError::InvalidDefinition(e.to_string()))?;
        Ok(Self::builder(definition))
    }

    pub fn compile(self) -> Result<Task, TaskBuildError> {
        let nodes =
            NodeBuilder::new(&self.definition, &self.registry, &self.external_keys).build_nodes()?;

        let task = Task::new(self.definition.id, nodes, self.first_run_key);
        tracing::info!(
            task = %task.id(),
            nodes = task.nodes().len(),
            steps = task.step_count(),
            "Compiled task"
        );
        Ok(task)
    }
}
