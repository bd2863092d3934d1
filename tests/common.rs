//! Common test utilities for building task definitions and walking them.
use stepwise::prelude::*;

/// The hand-selection flow: two hand sections gated on an answer the host
/// records before the task starts.
///
/// Route: overview, instruction, [left], [right], completion
#[allow(dead_code)]
pub fn create_hand_definition() -> TaskDefinition {
    TaskDefinition {
        id: "tapping".to_string(),
        nodes: vec![
            NodeDefinition::Step(StepDefinition::new("overview")),
            NodeDefinition::Step(StepDefinition::new("instruction")),
            hand_section("left"),
            hand_section("right"),
            NodeDefinition::Step(StepDefinition::new("completion")),
        ],
    }
}

#[allow(dead_code)]
fn hand_section(hand: &str) -> NodeDefinition {
    NodeDefinition::Section(SectionDefinition {
        id: hand.to_string(),
        steps: vec![
            StepDefinition::new(&format!("{}Instruction", hand)),
            StepDefinition::new(&format!("{}Active", hand)),
        ],
        skip_unless: Some(ConditionDefinition::leaf("includes", "handSelection", hand)),
    })
}

/// Compiles the hand flow with `handSelection` declared as a host-supplied key.
#[allow(dead_code)]
pub fn create_hand_navigator() -> Navigator {
    let task = Compiler::builder(create_hand_definition())
        .with_external_key("handSelection")
        .build()
        .compile()
        .expect("hand task should compile");
    Navigator::new(task)
}

/// The first-run flow.
///
/// Route: first, instructionFirstRunOnly (first run only), instructionNotFirstRunOnly, completion
#[allow(dead_code)]
pub fn create_first_run_definition() -> TaskDefinition {
    TaskDefinition {
        id: "memory".to_string(),
        nodes: vec![
            NodeDefinition::Step(StepDefinition::new("first")),
            NodeDefinition::Step(StepDefinition {
                id: "instructionFirstRunOnly".to_string(),
                first_run_only: true,
            }),
            NodeDefinition::Step(StepDefinition::new("instructionNotFirstRunOnly")),
            NodeDefinition::Step(StepDefinition::new("completion")),
        ],
    }
}

#[allow(dead_code)]
pub fn create_first_run_navigator() -> Navigator {
    let task = Compiler::builder(create_first_run_definition())
        .build()
        .compile()
        .expect("first-run task should compile");
    Navigator::new(task)
}

/// Walks forward from the start like a host would, answering every step
/// with `true`, and returns the visited step identifiers.
#[allow(dead_code)]
pub fn walk_forward(navigator: &Navigator, mut history: AnswerHistory) -> Vec<String> {
    let mut visited = Vec::new();
    let mut current: Option<String> = None;
    while let After::Step(step) = navigator
        .step_after(current.as_deref(), &history)
        .expect("forward navigation should succeed")
    {
        visited.push(step.id.clone());
        history.record(&step.id, true);
        current = Some(step.id.clone());
    }
    visited
}

/// Walks backward from `from` to the start and returns the visited steps,
/// nearest first, excluding `from` itself.
#[allow(dead_code)]
pub fn walk_backward(navigator: &Navigator, history: &AnswerHistory, from: &str) -> Vec<String> {
    let mut visited = Vec::new();
    let mut current = from.to_string();
    while let Before::Step(step) = navigator
        .step_before(Some(current.as_str()), history)
        .expect("backward navigation should succeed")
    {
        visited.push(step.id.clone());
        current = step.id.clone();
    }
    visited
}

/// A history holding only the hand selection.
#[allow(dead_code)]
pub fn hand_history(selection: impl Into<AnswerValue>) -> AnswerHistory {
    AnswerHistory::new().with("handSelection", selection)
}

#[allow(dead_code)]
pub fn choices(values: &[&str]) -> AnswerValue {
    AnswerValue::Choices(values.iter().map(|v| v.to_string()).collect())
}
