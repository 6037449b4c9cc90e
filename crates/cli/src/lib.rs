//! `amtest-cli` — library side of the `amtest` binary.
//!
//! The pipeline driver lives here so integration tests can run it without
//! spawning the binary.

pub mod exit_codes;
pub mod pipeline;
pub mod settings;

use exit_codes::{EXIT_ERROR, EXIT_INPUT, EXIT_USAGE};

/// Error carried to the process boundary: exit code + message (+ hint).
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn args(message: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, message)
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, message)
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
