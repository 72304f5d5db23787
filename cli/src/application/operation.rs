//! The operation protocol every command funnels through.
//!
//! An `Operation` returns an `Outcome` instead of exiting the process, so
//! each command can be exercised with fake collaborators and its outcome
//! inspected directly. `execute` is the single place outcomes become
//! process-level success or failure.

use thiserror::Error;

/// Result of running an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Completed successfully.
    Ok,
    /// Failed with a user-facing message.
    Error(String),
    /// The user declined a confirmation prompt; nothing was done.
    Declined,
}

impl Outcome {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Error message, if this is a failure.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            Self::Ok | Self::Declined => None,
        }
    }
}

impl From<anyhow::Result<Outcome>> for Outcome {
    fn from(result: anyhow::Result<Outcome>) -> Self {
        match result {
            Ok(outcome) => outcome,
            Err(e) => Self::Error(format!("{e:#}")),
        }
    }
}

/// A runnable command.
#[allow(async_fn_in_trait)]
pub trait Operation {
    async fn run(&self) -> Outcome;
}

/// Process-level failure produced by `execute`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct OperationFailed {
    pub message: String,
    /// Exit status the process should terminate with.
    pub code: i32,
}

/// Run `op` and map its outcome to process behaviour.
///
/// `Declined` is treated as success so that answering "no" to a prompt
/// exits cleanly.
///
/// # Errors
///
/// Returns `OperationFailed` with exit code 1 when the operation reports an
/// error.
pub async fn execute(op: &impl Operation) -> Result<(), OperationFailed> {
    match op.run().await {
        Outcome::Ok | Outcome::Declined => Ok(()),
        Outcome::Error(message) => {
            tracing::debug!(%message, "operation failed");
            Err(OperationFailed { message, code: 1 })
        }
    }
}
