//! Configuration for weft.
//!
//! Two steps, both explicit:
//!
//! 1. [`load_and_apply`] reads XDG `config.toml` and a project `.env` and fills in process
//!    environment variables that are not already set (**existing env > .env > XDG**).
//! 2. [`Settings::from_env`] reads the provider choice and per-provider key, base URL and
//!    model into a plain value that callers pass to the orchestrator. Nothing downstream
//!    reads the environment on its own.

mod dotenv;
mod settings;
mod xdg_toml;

use std::path::Path;
use thiserror::Error;

pub use settings::{Provider, ProviderSettings, Settings};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
    #[error("unknown provider: {0} (use openai, openrouter, mistral or mock)")]
    UnknownProvider(String),
}

/// Loads config from XDG `config.toml` and optional project `.env`, then sets environment
/// variables only for keys that are **not** already set.
///
/// Order of precedence when a key is missing in the process environment:
/// 1. Value from project `.env` (current directory or `override_dir` if given)
/// 2. Value from `$XDG_CONFIG_HOME/<app_name>/config.toml` `[env]` table
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let mut merged = xdg_toml::load_env_map(app_name)?;
    merged.extend(dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?);

    for (key, value) in merged {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
        }
    }
    Ok(())
}

/// Serializes tests that mutate process environment variables.
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}
