use super::Condition;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A leaf unit of work presented to the participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    /// Include this step only when the participant has not completed the flow before.
    pub first_run_only: bool,
}

impl Step {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            first_run_only: false,
        }
    }

    pub fn first_run_only(id: &str) -> Self {
        Self {
            id: id.to_string(),
            first_run_only: true,
        }
    }
}

/// A named, ordered group of steps that is visited or skipped as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub steps: Vec<Step>,
    /// The section is skipped unless this condition resolves to `true`.
    /// `None` means the section is always visited.
    pub skip_unless: Option<Condition>,
}

/// A top-level entry of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskNode {
    Step(Step),
    Section(Section),
}

impl TaskNode {
    pub fn id(&self) -> &str {
        match self {
            TaskNode::Step(step) => &step.id,
            TaskNode::Section(section) => &section.id,
        }
    }
}

/// Where a step lives in the task tree: the top-level node and, for section
/// children, the position inside that section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepLocation {
    pub node: usize,
    pub child: Option<usize>,
}

/// An immutable, validated assessment flow.
///
/// Tasks are produced by the `Compiler`, which guarantees globally unique
/// identifiers and resolvable branching keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: String,
    nodes: Vec<TaskNode>,
    first_run_key: String,
    index: AHashMap<String, StepLocation>,
}

impl Task {
    pub(crate) fn new(id: String, nodes: Vec<TaskNode>, first_run_key: String) -> Self {
        let mut index = AHashMap::new();
        for (node_idx, node) in nodes.iter().enumerate() {
            match node {
                TaskNode::Step(step) => {
                    index.insert(
                        step.id.clone(),
                        StepLocation {
                            node: node_idx,
                            child: None,
                        },
                    );
                }
                TaskNode::Section(section) => {
                    for (child_idx, step) in section.steps.iter().enumerate() {
                        index.insert(
                            step.id.clone(),
                            StepLocation {
                                node: node_idx,
                                child: Some(child_idx),
                            },
                        );
                    }
                }
            }
        }
        Self {
            id,
            nodes,
            first_run_key,
            index,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn nodes(&self) -> &[TaskNode] {
        &self.nodes
    }

    /// The answer key consulted for first-run-only steps.
    pub fn first_run_key(&self) -> &str {
        &self.first_run_key
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Total number of steps, including those nested in sections.
    pub fn step_count(&self) -> usize {
        self.index.len()
    }

    pub fn contains_step(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        let location = self.index.get(id)?;
        match (self.nodes.get(location.node)?, location.child) {
            (TaskNode::Step(step), None) => Some(step),
            (TaskNode::Section(section), Some(child)) => section.steps.get(child),
            _ => None,
        }
    }

    /// Returns the section a step belongs to, if any.
    pub fn section_of(&self, id: &str) -> Option<&Section> {
        let location = self.index.get(id)?;
        match self.nodes.get(location.node)? {
            TaskNode::Section(section) => Some(section),
            TaskNode::Step(_) => None,
        }
    }

    /// Every answer key that can change the route: the keys read by section
    /// conditions plus the first-run key.
    pub fn decision_keys(&self) -> Vec<&str> {
        let mut keys = vec![self.first_run_key.as_str()];
        for node in &self.nodes {
            if let TaskNode::Section(Section {
                skip_unless: Some(condition),
                ..
            }) = node
            {
                condition.get_required_keys(&mut keys);
            }
        }
        keys
    }

    /// Iterates every step in declaration order, ignoring skip rules.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.nodes.iter().flat_map(|node| match node {
            TaskNode::Step(step) => std::slice::from_ref(step).iter(),
            TaskNode::Section(section) => section.steps.iter(),
        })
    }
}
