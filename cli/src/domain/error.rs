//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use serde::Deserialize;
use thiserror::Error;

// ── Run errors ────────────────────────────────────────────────────────────────

/// Errors raised while validating or driving a one-off run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("Command is required")]
    CommandRequired,

    #[error("environment and heritage-name are exclusive")]
    EnvironmentAndHeritage,

    #[error("environment, heritage-name and branch-name are exclusive")]
    BranchExclusive,

    #[error("Env variable {0} is not valid. Name must match [A-Z_]+=")]
    InvalidEnvVar(String),

    #[error("No heritage found for branch: {0}")]
    BranchNotFound(String),

    #[error("Unexpected task status {0}")]
    UnexpectedStatus(String),

    #[error("Task did not start within {0}s")]
    WaitTimedOut(u64),

    #[error("Failed to find the container. Maybe try again")]
    ContainerNotFound,

    #[error("District {0} has no bastion host")]
    NoBastion(String),

    #[error("API response did not include an SSH certificate")]
    MissingCertificate,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to local configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment is invalid")]
    EnvironmentInvalid,

    #[error("cannot determine home directory")]
    NoHomeDir,

    #[error("Unrecognized auth backend")]
    UnknownAuthBackend,
}

// ── API errors ────────────────────────────────────────────────────────────────

/// Error body returned by the Barcelona API for non-2xx responses.
///
/// Only `message` is shown unless `verbose` is set, in which case the
/// server-side debug message and backtrace are appended.
#[derive(Debug, Clone, Default, Deserialize, Error)]
#[error("{}", self.render())]
pub struct ApiError {
    #[serde(rename = "error", default)]
    pub message: String,
    #[serde(default)]
    pub debug_message: Option<String>,
    #[serde(default)]
    pub backtrace: Vec<String>,
    #[serde(skip)]
    pub verbose: bool,
}

impl ApiError {
    /// Return a copy that renders its debug fields.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn render(&self) -> String {
        if !self.verbose {
            return self.message.clone();
        }
        format!(
            "{}\n\n{}\n{}\n",
            self.message,
            self.debug_message.as_deref().unwrap_or_default(),
            self.backtrace.join("\n")
        )
    }
}
