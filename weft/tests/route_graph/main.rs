//! Integration tests for the route graph and the engine underneath it.

#[path = "../init_logging.rs"]
mod init_logging;

mod common;
mod engine;
mod scenarios;
