use crate::compiler::optimizer::ConditionOptimizer;
use crate::compiler::parsing::ConditionParser;
use crate::definition::{ConditionDefinition, NodeDefinition, StepDefinition, TaskDefinition};
use crate::error::TaskBuildError;
use crate::task::{Condition, Section, Step, TaskNode};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

/// Responsible for turning a `TaskDefinition` into validated task nodes.
pub(super) struct NodeBuilder<'a> {
    definition: &'a TaskDefinition,
    registry: &'a AHashMap<String, Box<dyn ConditionParser>>,
    external_keys: &'a AHashSet<String>,
}

impl<'a> NodeBuilder<'a> {
    pub(super) fn new(
        definition: &'a TaskDefinition,
        registry: &'a AHashMap<String, Box<dyn ConditionParser>>,
        external_keys: &'a AHashSet<String>,
    ) -> Self {
        Self {
            definition,
            registry,
            external_keys,
        }
    }

    /// Builds every top-level node, or fails without producing a partial task.
    pub(super) fn build_nodes(&self) -> Result<Vec<TaskNode>, TaskBuildError> {
        self.check_identifiers()?;

        // Steps declared so far; a section may only branch on answers that
        // can exist by the time traversal reaches it.
        let mut declared: AHashSet<&str> = AHashSet::new();
        let mut nodes = Vec::with_capacity(self.definition.nodes.len());

        for node in &self.definition.nodes {
            match node {
                NodeDefinition::Step(step) => {
                    declared.insert(&step.id);
                    nodes.push(TaskNode::Step(Self::build_step(step)));
                }
                NodeDefinition::Section(section) => {
                    let skip_unless = section
                        .skip_unless
                        .as_ref()
                        .map(|c| self.build_condition(&section.id, c))
                        .transpose()?
                        .map(ConditionOptimizer::optimize);

                    if let Some(condition) = &skip_unless {
                        self.check_branching_keys(&section.id, condition, &declared)?;
                    }

                    declared.extend(section.steps.iter().map(|s| s.id.as_str()));
                    nodes.push(TaskNode::Section(Section {
                        id: section.id.clone(),
                        steps: section.steps.iter().map(Self::build_step).collect(),
                        skip_unless,
                    }));
                }
            }
        }
        Ok(nodes)
    }

    fn build_step(step: &StepDefinition) -> Step {
        Step {
            id: step.id.clone(),
            first_run_only: step.first_run_only,
        }
    }

    /// Recursively parses a condition definition, children first.
    fn build_condition(
        &self,
        section_id: &str,
        definition: &ConditionDefinition,
    ) -> Result<Condition, TaskBuildError> {
        let children = definition
            .conditions
            .iter()
            .map(|child| self.build_condition(section_id, child))
            .collect::<Result<Vec<_>, _>>()?;

        let parser = self
            .registry
            .get(&definition.condition_type)
            .ok_or_else(|| TaskBuildError::InvalidConditionType {
                section_id: section_id.to_string(),
                type_name: definition.condition_type.clone(),
            })?;

        parser.parse(section_id, definition, children)
    }

    /// Rejects an empty task id, and empty or duplicate identifiers across
    /// steps and sections.
    fn check_identifiers(&self) -> Result<(), TaskBuildError> {
        if self.definition.id.trim().is_empty() {
            return Err(TaskBuildError::EmptyTaskId);
        }
        let mut ids: Vec<&str> = Vec::new();
        for node in &self.definition.nodes {
            match node {
                NodeDefinition::Step(step) => {
                    self.require_id(&step.id, &self.definition.id)?;
                    ids.push(&step.id);
                }
                NodeDefinition::Section(section) => {
                    self.require_id(&section.id, &self.definition.id)?;
                    ids.push(&section.id);
                    for step in &section.steps {
                        self.require_id(&step.id, &section.id)?;
                        ids.push(&step.id);
                    }
                }
            }
        }

        match ids.into_iter().duplicates().next() {
            Some(duplicate) => Err(TaskBuildError::DuplicateIdentifier(duplicate.to_string())),
            None => Ok(()),
        }
    }

    fn require_id(&self, id: &str, parent: &str) -> Result<(), TaskBuildError> {
        if id.trim().is_empty() {
            Err(TaskBuildError::EmptyIdentifier {
                parent: parent.to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn check_branching_keys(
        &self,
        section_id: &str,
        condition: &Condition,
        declared: &AHashSet<&str>,
    ) -> Result<(), TaskBuildError> {
        let mut keys = Vec::new();
        condition.get_required_keys(&mut keys);
        match keys
            .into_iter()
            .find(|k| !declared.contains(k) && !self.external_keys.contains(*k))
        {
            Some(key) => Err(TaskBuildError::UnknownBranchingKey {
                section_id: section_id.to_string(),
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }
}
