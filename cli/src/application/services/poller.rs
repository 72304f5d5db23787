//! Application service: wait for a one-off to start running.
//!
//! Strictly sequential: one `GET` per iteration, then a fixed sleep. Only
//! `PENDING` is retried; a failed request or any other status ends the
//! wait immediately.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{ApiGet, Sleeper};
use crate::domain::error::RunError;
use crate::domain::oneoff::{Oneoff, OneoffResponse, TaskStatus};

/// Fixed delay between status checks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// How often to poll and, optionally, how long to keep waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Upper bound on total time spent sleeping. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: POLL_INTERVAL,
            timeout: None,
        }
    }
}

/// Poll `path` until the one-off reports `RUNNING` and return that snapshot.
///
/// # Errors
///
/// Returns `RunError::UnexpectedStatus` for any status other than `PENDING`
/// or `RUNNING`, `RunError::WaitTimedOut` when the policy's timeout is
/// exhausted, or the underlying error if a request or decode fails.
pub async fn wait_until_running(
    api: &impl ApiGet,
    sleeper: &impl Sleeper,
    path: &str,
    policy: &PollPolicy,
) -> Result<Oneoff> {
    let mut waited = Duration::ZERO;
    loop {
        let resp = api.get(path).await?;
        let resp: OneoffResponse =
            serde_json::from_slice(&resp).context("decoding one-off status")?;
        let status = &resp.oneoff.status;
        tracing::debug!(%path, %status, "polled one-off");

        match status {
            TaskStatus::Running => return Ok(resp.oneoff),
            TaskStatus::Pending => {
                if let Some(limit) = policy.timeout
                    && waited >= limit
                {
                    return Err(RunError::WaitTimedOut(limit.as_secs()).into());
                }
                sleeper.sleep(policy.interval).await;
                waited += policy.interval;
            }
            // INACTIVE, STOPPED, or anything the API adds later.
            other => return Err(RunError::UnexpectedStatus(other.to_string()).into()),
        }
    }
}
