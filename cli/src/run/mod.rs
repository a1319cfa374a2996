//! Run orchestration: builds a [`RouteRunner`] for the chosen provider and drives one
//! question through it, optionally reporting node events as they happen.

mod display;

pub use display::{event_json, format_event, truncate_display};

use std::sync::Arc;

use config::{Provider, Settings};
use serde_json::{json, Value};
use tracing::info;
use weft::graph::{generate_dot, generate_text};
use weft::{client_from_settings, MockGeneration, RouteRunner, RouteState};

use crate::CliError;

/// Questions answered by `--demo`, one per branch.
pub const DEMO_QUESTIONS: [&str; 3] = [
    "Make a mini quiz on Python list comprehensions.",
    "What is LangGraph and when should it be used?",
    "Sum up the benefits of RAG in an HR assistant.",
];

/// Output format for `--graph`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphFormat {
    Dot,
    Text,
}

/// Per-question options taken from the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunOptions {
    /// Report node events while running (stderr lines, or an `events` array with `--json`).
    pub stream: bool,
    /// Return the final state as JSON instead of the answer text.
    pub output_json: bool,
}

/// Result of one question.
#[derive(Debug)]
pub enum RunOutput {
    Answer(String),
    Json(Value),
}

/// Resolves the provider (explicit choice, else the configured default) and compiles
/// the route graph over it.
pub fn build_runner(settings: &Settings, provider: Option<Provider>) -> Result<RouteRunner, CliError> {
    let provider = provider.unwrap_or(settings.default_provider);
    let llm = client_from_settings(settings, provider)?;
    info!(provider = %provider, "route runner ready");
    Ok(RouteRunner::with_stub_content(llm)?)
}

/// Renders the route graph. Needs no provider: the structure does not depend on it.
pub fn render_graph(format: GraphFormat) -> Result<String, CliError> {
    let runner = RouteRunner::with_stub_content(Arc::new(MockGeneration::echo_body()))?;
    Ok(match format {
        GraphFormat::Dot => generate_dot(runner.graph()),
        GraphFormat::Text => generate_text(runner.graph()),
    })
}

/// Runs one question.
///
/// Plain runs return the answer text. With `output_json` the result is
/// `{"version", "answer", "state"}` plus `"events"` when streaming; without it, streamed
/// events are printed to stderr as they arrive.
pub async fn run_question(
    runner: &RouteRunner,
    question: &str,
    opts: RunOptions,
) -> Result<RunOutput, CliError> {
    if !opts.stream && !opts.output_json {
        return Ok(RunOutput::Answer(runner.run(question).await?));
    }

    let mut events = Vec::new();
    let state = if opts.stream {
        runner
            .stream_with_callback(question, |event| {
                if opts.output_json {
                    events.push(event_json(&event));
                } else if let Some(line) = format_event(&event) {
                    eprintln!("{}", line);
                }
            })
            .await?
    } else {
        runner.invoke(question).await?
    };

    if !opts.output_json {
        return Ok(RunOutput::Answer(state.answer.unwrap_or_default()));
    }
    let mut out = state_json(&state)?;
    if opts.stream {
        out["events"] = Value::Array(events);
    }
    Ok(RunOutput::Json(out))
}

fn state_json(state: &RouteState) -> Result<Value, CliError> {
    Ok(json!({
        "version": RouteState::VERSION,
        "answer": state.answer(),
        "state": serde_json::to_value(state)?,
    }))
}
