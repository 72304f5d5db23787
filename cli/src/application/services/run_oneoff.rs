//! `bcn run`: submit a one-off, wait for it to start, then shell into it.

use anyhow::Result;

use crate::application::operation::{Operation, Outcome};
use crate::application::ports::{ApiGet, ApiPost, Presenter, ProgressReporter, Sleeper};
use crate::application::services::launcher::launch_oneoff;
use crate::application::services::poller::{PollPolicy, wait_until_running};
use crate::application::services::ssh_session::{SessionOpener, SshTarget};
use crate::domain::error::RunError;
use crate::domain::oneoff::{OneoffRequest, find_container_instance, oneoff_path};

/// The run pipeline: launch → poll → resolve instance → SSH.
pub struct RunOneoffOperation<'a, A, Z, S, P> {
    api: &'a A,
    sleeper: &'a Z,
    ssh: &'a S,
    out: &'a P,
    heritage: String,
    request: OneoffRequest,
    policy: PollPolicy,
}

impl<'a, A, Z, S, P> RunOneoffOperation<'a, A, Z, S, P>
where
    A: ApiGet + ApiPost,
    Z: Sleeper,
    S: SessionOpener,
    P: ProgressReporter + Presenter,
{
    #[must_use]
    pub fn new(
        api: &'a A,
        sleeper: &'a Z,
        ssh: &'a S,
        out: &'a P,
        heritage: impl Into<String>,
        request: OneoffRequest,
    ) -> Self {
        Self {
            api,
            sleeper,
            ssh,
            out,
            heritage: heritage.into(),
            request,
            policy: PollPolicy::default(),
        }
    }

    /// Override the poll interval and timeout.
    #[must_use]
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    async fn connect(&self) -> Result<Outcome> {
        let launched = launch_oneoff(self.api, &self.heritage, &self.request).await?;

        if !self.request.interactive {
            self.out.oneoff(&launched.oneoff);
            return Ok(Outcome::Ok);
        }

        let certificate = launched.certificate.ok_or(RunError::MissingCertificate)?;
        let launch_district = launched.oneoff.district.clone().unwrap_or_default();

        self.out.step("Waiting for the process to start");
        let path = oneoff_path(&launch_district.name, &self.heritage, launched.oneoff.id);
        let running = wait_until_running(self.api, self.sleeper, &path, &self.policy).await?;

        self.out.step("Connecting to the process");
        // The running snapshot carries the placement; fall back to the fleet
        // view from submission when the status response omits the district.
        let district = running.district.as_ref().unwrap_or(&launch_district);
        let arn = running
            .container_instance_arn
            .as_deref()
            .or(launched.oneoff.container_instance_arn.as_deref())
            .unwrap_or_default();
        let instance = find_container_instance(&district.container_instances, arn)?;
        tracing::debug!(arn, ip = %instance.private_ip_address, "resolved container instance");

        let target = SshTarget {
            ip: &instance.private_ip_address,
            bastion_ip: district.bastion()?,
            certificate: &certificate,
        };
        let command = if running.interactive_run_command.is_empty() {
            &launched.oneoff.interactive_run_command
        } else {
            &running.interactive_run_command
        };
        self.ssh.open(&target, command).await?;
        Ok(Outcome::Ok)
    }
}

impl<A, Z, S, P> Operation for RunOneoffOperation<'_, A, Z, S, P>
where
    A: ApiGet + ApiPost,
    Z: Sleeper,
    S: SessionOpener,
    P: ProgressReporter + Presenter,
{
    async fn run(&self) -> Outcome {
        if self.heritage.is_empty() {
            return Outcome::error("heritage name is required");
        }
        self.connect().await.into()
    }
}
