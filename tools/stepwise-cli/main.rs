use clap::Parser;
use stepwise::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Inspect and walk conditional assessment tasks
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the task definition JSON file
    task_path: String,
    /// Optional path to an answer history JSON file
    history_path: Option<String>,

    /// Print the step presented after this one
    #[arg(long, conflicts_with = "before")]
    after: Option<String>,

    /// Print the step presented before this one
    #[arg(long)]
    before: Option<String>,

    /// Answer key consulted for first-run-only steps
    #[arg(long, default_value = DEFAULT_FIRST_RUN_KEY)]
    first_run_key: String,

    /// Branching keys supplied by the host rather than by a step
    #[arg(long = "external-key")]
    external_keys: Vec<String>,

    /// Write the compiled task artifact to this path
    #[arg(long)]
    save_artifact: Option<String>,

    /// Walk the task interactively, prompting for each answer
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    interactive: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let load_start = Instant::now();
    let task = compile_task(&cli);
    let history = match &cli.history_path {
        Some(path) => AnswerHistory::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load history from '{}': {}", path, e))
        }),
        None => AnswerHistory::new(),
    };
    let load_duration = load_start.elapsed();

    if let Some(path) = &cli.save_artifact {
        TaskArtifact::new(task.clone())
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save artifact: {}", e)));
        println!("  -> Wrote compiled task to '{}'", path);
    }

    let navigator = Navigator::new(task);

    if cli.interactive {
        run_interactive(&navigator, history);
    } else {
        run_report(&navigator, &history, &cli);
    }
    println!("\nLoaded and compiled in {:?}", load_duration);
}

fn compile_task(cli: &Cli) -> Task {
    let task_json = fs::read_to_string(&cli.task_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read task file '{}': {}",
            &cli.task_path, e
        ))
    });
    let definition: TaskDefinition = serde_json::from_str(&task_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse task JSON: {}", e)));

    let builder = cli.external_keys.iter().fold(
        Compiler::builder(definition).with_first_run_key(&cli.first_run_key),
        |builder, key| builder.with_external_key(key),
    );

    builder
        .build()
        .compile()
        .unwrap_or_else(|e| exit_with_error(&format!("Task compilation failed: {}", e)))
}

/// Prints the route implied by the history and answers a single navigation query.
fn run_report(navigator: &Navigator, history: &AnswerHistory, cli: &Cli) {
    let task = navigator.task();
    println!(
        "Task '{}': {} top-level nodes, {} steps",
        task.id(),
        task.nodes().len(),
        task.step_count()
    );
    println!("History: {} answers", history.len());

    let trace = navigator.explain(history);
    println!("\n--- Route ---");
    println!("{}", TraceFormatter::format_route(&trace));
    println!("\n--- Decisions ---");
    println!("{}", TraceFormatter::format_trace(&trace));

    if let Some(id) = &cli.after {
        match navigator.step_after(Some(id.as_str()), history) {
            Ok(After::Step(step)) => println!("\nAfter '{}': {}", id, step.id),
            Ok(After::Terminal) => println!("\nAfter '{}': <terminal>", id),
            Err(e) => exit_with_error(&e.to_string()),
        }
    }
    if let Some(id) = &cli.before {
        match navigator.step_before(Some(id.as_str()), history) {
            Ok(Before::Step(step)) => println!("\nBefore '{}': {}", id, step.id),
            Ok(Before::Start) => println!("\nBefore '{}': <start>", id),
            Err(e) => exit_with_error(&e.to_string()),
        }
    }
}

/// Walks the task step by step, reading answers from stdin.
fn run_interactive(navigator: &Navigator, history: AnswerHistory) {
    println!("--- Stepwise Interactive Mode ---");
    println!("Answers: true/false, numbers, text, or a,b,c for multiple choice.");
    println!("Type ':back' to go back, ':quit' to abandon.\n");

    let mut run = TaskRun::with_history(navigator, history);
    let mut progress = run
        .start()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    while let Progress::Next(step) = progress {
        let marker = if step.first_run_only { " (first run)" } else { "" };
        let input = prompt_for_input(&format!("{}{}", step.id, marker));
        match input.as_str() {
            ":quit" => {
                print_result(&run.abandon());
                return;
            }
            ":back" => match run.back() {
                Ok(Some(_)) => {}
                Ok(None) => {
                    println!("  (back at the start)");
                    progress = run
                        .start()
                        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
                }
                Err(e) => println!("  ! {}", e),
            },
            _ => match run.answer(parse_answer(&input)) {
                Ok(next) => progress = next,
                Err(e) => println!("  ! {}", e),
            },
        }
        if let Some(current) = run.current() {
            progress = Progress::Next(current);
        }
    }

    match run.finish() {
        Ok(result) => print_result(&result),
        Err(e) => exit_with_error(&e.to_string()),
    }
}

fn parse_answer(input: &str) -> AnswerValue {
    match input {
        "" | "null" => AnswerValue::Null,
        "true" | "yes" => AnswerValue::Bool(true),
        "false" | "no" => AnswerValue::Bool(false),
        _ if input.contains(',') => AnswerValue::Choices(
            input
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        _ => match input.parse::<f64>() {
            Ok(n) => AnswerValue::Number(n),
            Err(_) => AnswerValue::Text(input.to_string()),
        },
    }
}

fn print_result(result: &TaskResult) {
    println!("\nRun finished: {:?}", result.outcome);
    match result.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&format!("Failed to serialize result: {}", e)),
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str) -> String {
    let mut line = String::new();
    print!("> {}: ", prompt_text);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to flush stdout: {}", e));
    }
    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read line: {}", e));
    }
    line.trim().to_string()
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
