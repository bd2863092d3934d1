//! Tests for forward and backward navigation over compiled tasks.
mod common;
use common::*;
use stepwise::prelude::*;

#[test]
fn test_empty_task_is_terminal_immediately() {
    let task = Compiler::builder(TaskDefinition {
        id: "empty".to_string(),
        nodes: vec![],
    })
    .build()
    .compile()
    .unwrap();
    let navigator = Navigator::new(task);

    let history = AnswerHistory::new();
    assert_eq!(navigator.step_after(None, &history).unwrap(), After::Terminal);
    assert!(navigator.route(&history).is_empty());
}

#[test]
fn test_left_only_route() {
    let navigator = create_hand_navigator();
    let visited = walk_forward(&navigator, hand_history("left"));
    assert_eq!(
        visited,
        vec!["overview", "instruction", "leftInstruction", "leftActive", "completion"]
    );
}

#[test]
fn test_right_only_route() {
    let navigator = create_hand_navigator();
    let visited = walk_forward(&navigator, hand_history("right"));
    assert_eq!(
        visited,
        vec!["overview", "instruction", "rightInstruction", "rightActive", "completion"]
    );
}

#[test]
fn test_both_hands_follow_declaration_order() {
    let navigator = create_hand_navigator();
    let expected = vec![
        "overview",
        "instruction",
        "leftInstruction",
        "leftActive",
        "rightInstruction",
        "rightActive",
        "completion",
    ];

    // Selection order must not change traversal order.
    let right_first = walk_forward(&navigator, hand_history(choices(&["right", "left"])));
    let left_first = walk_forward(&navigator, hand_history(choices(&["left", "right"])));
    assert_eq!(right_first, expected);
    assert_eq!(left_first, expected);
}

#[test]
fn test_missing_branching_key_skips_sections() {
    let navigator = create_hand_navigator();
    let visited = walk_forward(&navigator, AnswerHistory::new());
    assert_eq!(visited, vec!["overview", "instruction", "completion"]);
}

#[test]
fn test_first_run_includes_first_run_only_step() {
    let navigator = create_first_run_navigator();
    let history = AnswerHistory::new().with(DEFAULT_FIRST_RUN_KEY, true);
    let visited = walk_forward(&navigator, history);
    assert_eq!(
        visited,
        vec![
            "first",
            "instructionFirstRunOnly",
            "instructionNotFirstRunOnly",
            "completion"
        ]
    );
}

#[test]
fn test_repeat_run_excludes_first_run_only_step() {
    let navigator = create_first_run_navigator();
    let history = AnswerHistory::new().with(DEFAULT_FIRST_RUN_KEY, false);
    let visited = walk_forward(&navigator, history);
    assert_eq!(
        visited,
        vec!["first", "instructionNotFirstRunOnly", "completion"]
    );
    assert!(!visited.contains(&"instructionFirstRunOnly".to_string()));
}

#[test]
fn test_missing_first_run_key_includes_step() {
    let navigator = create_first_run_navigator();
    let visited = walk_forward(&navigator, AnswerHistory::new());
    assert!(visited.contains(&"instructionFirstRunOnly".to_string()));
    assert_eq!(visited.len(), 4);
}

#[test]
fn test_non_boolean_first_run_answer_includes_step() {
    let navigator = create_first_run_navigator();
    let history = AnswerHistory::new().with(DEFAULT_FIRST_RUN_KEY, "no");
    let visited = walk_forward(&navigator, history);
    assert!(visited.contains(&"instructionFirstRunOnly".to_string()));
}

#[test]
fn test_step_after_is_idempotent() {
    let navigator = create_hand_navigator();
    let history = hand_history("right").with("overview", true).with("instruction", true);

    let first = navigator.step_after(Some("instruction"), &history).unwrap();
    let second = navigator.step_after(Some("instruction"), &history).unwrap();
    assert_eq!(first, second);
    match first {
        After::Step(step) => assert_eq!(step.id, "rightInstruction"),
        After::Terminal => panic!("Expected a next step"),
    }
}

#[test]
fn test_step_after_last_step_is_terminal() {
    let navigator = create_hand_navigator();
    let history = hand_history("left");
    assert_eq!(
        navigator.step_after(Some("completion"), &history).unwrap(),
        After::Terminal
    );
}

#[test]
fn test_backward_mirrors_forward() {
    let navigator = create_hand_navigator();
    for selection in [
        AnswerValue::from("left"),
        AnswerValue::from("right"),
        choices(&["right", "left"]),
    ] {
        let history = hand_history(selection);
        let mut forward = walk_forward(&navigator, history.clone());

        let mut answered = history.clone();
        for id in &forward {
            answered.record(id, true);
        }
        let last = forward.pop().unwrap();
        let mut backward = walk_backward(&navigator, &answered, &last);
        backward.reverse();
        assert_eq!(backward, forward);
    }
}

#[test]
fn test_step_before_first_step_is_start() {
    let navigator = create_hand_navigator();
    let history = hand_history("left");
    assert_eq!(
        navigator.step_before(Some("overview"), &history).unwrap(),
        Before::Start
    );
}

#[test]
fn test_step_before_from_start_is_usage_error() {
    let navigator = create_hand_navigator();
    let result = navigator.step_before(None, &AnswerHistory::new());
    assert_eq!(result, Err(NavigationError::BeforeStart));
}

fn create_mode_navigator() -> Navigator {
    let definition = TaskDefinition {
        id: "late".to_string(),
        nodes: vec![
            NodeDefinition::Step(StepDefinition::new("start")),
            NodeDefinition::Section(SectionDefinition {
                id: "extra".to_string(),
                steps: vec![StepDefinition::new("extraStep")],
                skip_unless: Some(ConditionDefinition::leaf("equals", "mode", "full")),
            }),
            NodeDefinition::Step(StepDefinition::new("end")),
        ],
    };
    let task = Compiler::builder(definition)
        .with_external_key("mode")
        .build()
        .compile()
        .unwrap();
    Navigator::new(task)
}

#[test]
fn test_step_before_uses_history_as_it_stood() {
    let navigator = create_mode_navigator();
    // Later answers to steps that gate nothing leave the route alone.
    let history = AnswerHistory::new()
        .with("mode", "full")
        .with("start", true)
        .with("extraStep", true)
        .with("end", true)
        .with("start", false);

    match navigator.step_before(Some("end"), &history).unwrap() {
        Before::Step(step) => assert_eq!(step.id, "extraStep"),
        Before::Start => panic!("Expected a previous step"),
    }
}

#[test]
fn test_step_before_follows_changed_route_keys() {
    let navigator = create_mode_navigator();
    let history = AnswerHistory::new()
        .with("mode", "full")
        .with("start", true)
        .with("extraStep", true)
        .with("end", true)
        .with("mode", "short");

    // `mode` changed after `end` was answered; both directions see the new route.
    match navigator.step_before(Some("end"), &history).unwrap() {
        Before::Step(step) => assert_eq!(step.id, "start"),
        Before::Start => panic!("Expected a previous step"),
    }
    let route = navigator.route(&history);
    let ids: Vec<&str> = route.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["start", "end"]);
}

#[test]
fn test_step_before_after_reanswered_branch_stays_on_route() {
    let definition = TaskDefinition {
        id: "hands".to_string(),
        nodes: vec![
            NodeDefinition::Step(StepDefinition::new("hand")),
            NodeDefinition::Section(SectionDefinition {
                id: "left".to_string(),
                steps: vec![StepDefinition::new("leftA")],
                skip_unless: Some(ConditionDefinition::leaf("includes", "hand", "left")),
            }),
            NodeDefinition::Section(SectionDefinition {
                id: "right".to_string(),
                steps: vec![StepDefinition::new("rightA")],
                skip_unless: Some(ConditionDefinition::leaf("includes", "hand", "right")),
            }),
        ],
    };
    let navigator = Navigator::new(Compiler::builder(definition).build().compile().unwrap());
    let history = AnswerHistory::new()
        .with("hand", choices(&["left", "right"]))
        .with("leftA", true)
        .with("rightA", true)
        .with("hand", "right");

    assert_eq!(
        navigator.step_before(Some("rightA"), &history),
        Ok(Before::Step(navigator.task().step("hand").unwrap()))
    );
    assert_eq!(
        navigator.step_before(Some("leftA"), &history),
        Err(NavigationError::StepNotOnRoute("leftA".to_string()))
    );
}

#[test]
fn test_unknown_step_is_reported() {
    let navigator = create_hand_navigator();
    let history = hand_history("left");
    assert_eq!(
        navigator.step_after(Some("nope"), &history),
        Err(NavigationError::UnknownStep("nope".to_string()))
    );
    assert_eq!(
        navigator.step_before(Some("nope"), &history),
        Err(NavigationError::UnknownStep("nope".to_string()))
    );
}

#[test]
fn test_step_filtered_out_is_not_on_route() {
    let navigator = create_hand_navigator();
    let history = hand_history("left");
    assert_eq!(
        navigator.step_after(Some("rightActive"), &history),
        Err(NavigationError::StepNotOnRoute("rightActive".to_string()))
    );
}

#[test]
fn test_empty_section_contributes_nothing() {
    let definition = TaskDefinition {
        id: "hollow".to_string(),
        nodes: vec![
            NodeDefinition::Step(StepDefinition::new("a")),
            NodeDefinition::Section(SectionDefinition {
                id: "nothing".to_string(),
                steps: vec![],
                skip_unless: None,
            }),
            NodeDefinition::Step(StepDefinition::new("b")),
        ],
    };
    let navigator = Navigator::new(Compiler::builder(definition).build().compile().unwrap());
    let history = AnswerHistory::new().with("a", true);
    match navigator.step_after(Some("a"), &history).unwrap() {
        After::Step(step) => assert_eq!(step.id, "b"),
        After::Terminal => panic!("Expected step 'b'"),
    }
}

#[test]
fn test_section_of_only_first_run_steps_is_empty_on_repeat() {
    let definition = TaskDefinition {
        id: "intro".to_string(),
        nodes: vec![
            NodeDefinition::Step(StepDefinition::new("welcome")),
            NodeDefinition::Section(SectionDefinition {
                id: "tutorial".to_string(),
                steps: vec![StepDefinition {
                    id: "tutorialStep".to_string(),
                    first_run_only: true,
                }],
                skip_unless: None,
            }),
            NodeDefinition::Step(StepDefinition::new("done")),
        ],
    };
    let navigator = Navigator::new(Compiler::builder(definition).build().compile().unwrap());
    let history = AnswerHistory::new().with(DEFAULT_FIRST_RUN_KEY, false);
    assert_eq!(walk_forward(&navigator, history), vec!["welcome", "done"]);
}

#[test]
fn test_explain_reports_skip_reasons() {
    let navigator = create_hand_navigator();
    let trace = navigator.explain(&hand_history("left"));

    assert_eq!(
        trace.route(),
        vec!["overview", "instruction", "leftInstruction", "leftActive", "completion"]
    );
    let skipped: Vec<&str> = trace.skipped().map(|d| d.step_id.as_str()).collect();
    assert_eq!(skipped, vec!["rightInstruction", "rightActive"]);

    let formatted = TraceFormatter::format_trace(&trace);
    assert!(formatted.contains("+ leftActive"));
    assert!(formatted.contains(
        "- rightActive: skipped with section 'right' (handSelection includes \"right\" is false)"
    ));
}

#[test]
fn test_explain_reports_unresolved_and_first_run() {
    let navigator = create_hand_navigator();
    let trace = navigator.explain(&AnswerHistory::new());
    let formatted = TraceFormatter::format_trace(&trace);
    assert!(formatted.contains("is unresolved"));

    let navigator = create_first_run_navigator();
    let history = AnswerHistory::new().with(DEFAULT_FIRST_RUN_KEY, false);
    let trace = navigator.explain(&history);
    assert_eq!(
        TraceFormatter::format_route(&trace),
        "first -> instructionNotFirstRunOnly -> completion"
    );
    assert!(
        TraceFormatter::format_trace(&trace)
            .contains("- instructionFirstRunOnly: first run only (isFirstRun is false)")
    );
}
