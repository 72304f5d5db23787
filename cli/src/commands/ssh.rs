//! `bcn ssh`: open a shell on a container instance in a district.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::execute;
use crate::application::services::ssh_session::SshBroker;
use crate::application::services::sshcmd::SshcmdOperation;

/// Arguments for the ssh command.
#[derive(Args, Debug)]
pub struct SshArgs {
    /// District name
    pub district: Option<String>,

    /// Private IP of the container instance
    pub ip: Option<String>,
}

/// Run `bcn ssh DISTRICT_NAME CONTAINER_INSTANCE_PRIVATE_IP`.
///
/// # Errors
///
/// Returns an error if an argument is missing, signing fails, or ssh exits
/// unsuccessfully.
pub async fn run(app: &AppContext, args: SshArgs) -> Result<()> {
    let reporter = app.reporter();
    let broker = SshBroker::new(&app.ssh, &app.fs, &app.runner, &reporter);
    let op = SshcmdOperation::new(
        &app.client,
        &broker,
        args.district.unwrap_or_default(),
        args.ip.unwrap_or_default(),
    );
    execute(&op).await?;
    Ok(())
}
