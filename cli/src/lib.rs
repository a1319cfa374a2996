//! Library side of the `weft` binary: building the runner, running one question and
//! shaping the output. `main.rs` and `repl.rs` only parse input and print.

mod error;
mod run;

pub use error::CliError;
pub use run::{
    build_runner, event_json, format_event, render_graph, run_question, truncate_display,
    GraphFormat, RunOptions, RunOutput, DEMO_QUESTIONS,
};
