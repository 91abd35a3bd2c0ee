//! Environment variable access.
//!
//! Resolution reads the environment through [`Env`] so tests can supply a
//! fixed map instead of mutating the process environment.

use anyhow::{Result, bail};

/// Read-only view of environment variables.
pub trait Env {
    /// Value of `key`, or `None` if unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Read a required secret. Blank values count as missing.
pub fn require_secret<E: Env>(env: &E, key: &str) -> Result<String> {
    match env.var(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => bail!("missing {key} (GitHub secret not set)"),
    }
}
