//! Application service: certificate-brokered SSH session through a bastion.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter, SshConfig};
use crate::domain::ssh::ssh_args;

/// Where to connect and the certificate that authorizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SshTarget<'a> {
    /// Private address of the container instance.
    pub ip: &'a str,
    pub bastion_ip: &'a str,
    /// Short-lived signed certificate for the configured key.
    pub certificate: &'a str,
}

/// Opens an interactive session to an SSH target.
#[allow(async_fn_in_trait)]
pub trait SessionOpener {
    /// Connect to `target` and run `command` (empty for a login shell).
    /// Blocks until the session ends.
    async fn open(&self, target: &SshTarget<'_>, command: &str) -> Result<()>;
}

/// Production `SessionOpener`: persists the certificate, then hands a
/// proxied `ssh` invocation to the command runner with inherited stdio.
pub struct SshBroker<'a, C, F, R, P> {
    config: &'a C,
    fs: &'a F,
    runner: &'a R,
    reporter: &'a P,
}

impl<'a, C, F, R, P> SshBroker<'a, C, F, R, P>
where
    C: SshConfig,
    F: LocalFs,
    R: CommandRunner,
    P: ProgressReporter,
{
    #[must_use]
    pub fn new(config: &'a C, fs: &'a F, runner: &'a R, reporter: &'a P) -> Self {
        Self {
            config,
            fs,
            runner,
            reporter,
        }
    }
}

impl<C, F, R, P> SessionOpener for SshBroker<'_, C, F, R, P>
where
    C: SshConfig,
    F: LocalFs,
    R: CommandRunner,
    P: ProgressReporter,
{
    async fn open(&self, target: &SshTarget<'_>, command: &str) -> Result<()> {
        let key = self.config.private_key_path();
        anyhow::ensure!(
            self.fs.exists(&key),
            "private key not found at {}. Run 'bcn login' first",
            key.display()
        );

        // ssh reads `<key>-cert.pub` from disk, so it must be in place now.
        let cert = self.config.cert_path();
        self.fs
            .write(&cert, target.certificate.as_bytes())
            .with_context(|| format!("writing certificate {}", cert.display()))?;

        let args = ssh_args(target.ip, target.bastion_ip, &key, command);
        if self.config.is_debug() {
            self.reporter.debug(&format!("ssh {}", args.join(" ")));
        }
        tracing::info!(ip = target.ip, bastion = target.bastion_ip, "opening ssh session");

        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        let status = self.runner.run_status("ssh", &argv).await?;
        anyhow::ensure!(status.success(), "ssh exited with {status}");
        Ok(())
    }
}
