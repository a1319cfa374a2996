//! `weft` binary: route a question to a direct, rag or quiz answer and print it.
//!
//! One question from `-m`/positional args, `--demo` for three sample questions, or
//! `-i` for a line-by-line loop. `--graph` prints the graph and exits.

mod logging;
mod repl;

use std::process::ExitCode;

use clap::Parser;
use cli::{
    build_runner, render_graph, run_question, CliError, GraphFormat, RunOptions, RunOutput,
    DEMO_QUESTIONS,
};
use config::{Provider, Settings};
use repl::run_repl_loop;
use tracing::{error, warn};

#[derive(Parser, Debug)]
#[command(name = "weft")]
#[command(about = "Weft: route a question to a direct, rag or quiz answer")]
struct Args {
    /// Question (or pass as positional arguments)
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Positional args: question when -m/--message is not used
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,

    /// Generation provider: openai, openrouter, mistral or mock (default: WEFT_PROVIDER, else openai)
    #[arg(long, value_name = "NAME")]
    provider: Option<Provider>,

    /// Print the final state as JSON instead of the answer text
    #[arg(long)]
    json: bool,

    /// With --json, pretty-print (multi-line)
    #[arg(long)]
    pretty: bool,

    /// Report node start/end and state updates while running
    #[arg(long)]
    stream: bool,

    /// Print the route graph (dot or text) and exit
    #[arg(long, value_name = "FORMAT")]
    graph: Option<GraphFormat>,

    /// Answer three sample questions, one per branch
    #[arg(long)]
    demo: bool,

    /// Interactive: read questions from stdin until EOF or `quit`
    #[arg(short, long)]
    interactive: bool,

    /// Verbose: log to stderr (node timing, routes)
    #[arg(short, long)]
    verbose: bool,
}

/// Prints one run's output: the answer text, or JSON (one line unless `pretty`).
pub(crate) fn print_output(output: RunOutput, pretty: bool) -> Result<(), serde_json::Error> {
    match output {
        RunOutput::Answer(answer) => println!("{}", answer),
        RunOutput::Json(value) => {
            let s = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            println!("{}", s);
        }
    }
    let _ = std::io::Write::flush(&mut std::io::stdout());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let loaded = config::load_and_apply("weft", None::<&std::path::Path>);
    let args = Args::parse();
    let log_guard = match logging::init(args.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("weft: logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = loaded.map_err(CliError::from) {
        warn!(error = %e, "config not applied, using process environment");
        eprintln!("weft: warning: {}", e);
    }

    let code = match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "weft failed");
            eprintln!("weft: {}", e);
            ExitCode::FAILURE
        }
    };
    // Flushes the non-blocking LOG_FILE writer.
    drop(log_guard);
    code
}

async fn run(args: Args) -> Result<(), CliError> {
    if let Some(format) = args.graph {
        print!("{}", render_graph(format)?);
        return Ok(());
    }

    let settings = Settings::from_env()?;
    let runner = build_runner(&settings, args.provider)?;
    let opts = RunOptions {
        stream: args.stream,
        output_json: args.json,
    };

    if args.demo {
        for question in DEMO_QUESTIONS {
            if !args.json {
                println!("Q: {}", question);
            }
            let output = run_question(&runner, question, opts).await?;
            print_output(output, args.pretty)?;
            if !args.json {
                println!();
            }
        }
        return Ok(());
    }

    let question = args.message.or_else(|| {
        if args.rest.is_empty() {
            None
        } else {
            Some(args.rest.join(" "))
        }
    });

    if args.interactive {
        if let Some(q) = question.as_deref().filter(|q| !q.trim().is_empty()) {
            match run_question(&runner, q, opts).await {
                Ok(output) => print_output(output, args.pretty)?,
                Err(e) => eprintln!("error: {}", e),
            }
        }
        return run_repl_loop(&runner, opts, args.pretty).await;
    }

    let question = question.ok_or(CliError::MissingQuestion)?;
    let output = run_question(&runner, &question, opts).await?;
    print_output(output, args.pretty)?;
    Ok(())
}
