use thiserror::Error;
use weft::{CompilationError, GenerationError, RouteRunError};

/// Anything that stops the CLI from producing an answer.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("config: {0}")]
    Config(#[from] config::LoadError),
    #[error(transparent)]
    Client(#[from] GenerationError),
    #[error("graph: {0}")]
    Compilation(#[from] CompilationError),
    #[error(transparent)]
    Run(#[from] RouteRunError),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("provide a question via -m/--message or positional args")]
    MissingQuestion,
}
