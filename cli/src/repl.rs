//! Interactive loop: read a question from stdin, answer it, repeat until EOF or quit.
//!
//! Used when `-i/--interactive` is passed. Each line is an independent run.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use cli::{run_question, CliError, RunOptions};
use weft::RouteRunner;

use crate::print_output;

/// Runs the loop: prompt, read line, answer, print, repeat.
///
/// Exits on EOF (Ctrl+D) or `quit`/`exit`/`/quit`; blank lines are skipped.
/// A failed run prints to stderr and the loop continues.
pub async fn run_repl_loop(
    runner: &RouteRunner,
    opts: RunOptions,
    pretty: bool,
) -> Result<(), CliError> {
    let mut reader = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match reader.next_line().await? {
            None => break,
            Some(s) if s.trim().is_empty() => continue,
            Some(s) if is_quit_command(&s) => break,
            Some(s) => s,
        };

        match run_question(runner, &line, opts).await {
            Ok(output) => print_output(output, pretty)?,
            Err(e) => eprintln!("error: {}", e),
        }
    }

    println!("Bye.");
    Ok(())
}

fn is_quit_command(s: &str) -> bool {
    let lower = s.trim().to_lowercase();
    matches!(lower.as_str(), "quit" | "exit" | "/quit")
}
