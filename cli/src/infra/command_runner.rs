//! Infrastructure implementation of the `CommandRunner` port.

use std::process::ExitStatus;

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;

/// Production `CommandRunner`. The child inherits the terminal and is killed
/// if the future is dropped (e.g. on Ctrl-C).
pub struct TokioCommandRunner;

impl CommandRunner for TokioCommandRunner {
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        tracing::debug!(program, argc = args.len(), "spawning");
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        child
            .wait()
            .await
            .with_context(|| format!("waiting for {program}"))
    }
}
