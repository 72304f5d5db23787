//! `bcn run`: launch a one-off task and attach to it over SSH.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::execute;
use crate::application::services::heritage::review_heritage;
use crate::application::services::poller::PollPolicy;
use crate::application::services::run_oneoff::RunOneoffOperation;
use crate::application::services::ssh_session::SshBroker;
use crate::domain::oneoff::OneoffRequest;
use crate::domain::{RunTarget, check_env_vars, select_target};
use crate::infra::config::{load_heritage_config, load_review_definition};

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Environment of heritage (from barcelona.yml)
    #[arg(short, long)]
    pub environment: Option<String>,

    /// Heritage name
    #[arg(short = 'H', long)]
    pub heritage_name: Option<String>,

    /// Git branch name of a review app
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Memory size in MB
    #[arg(short, long)]
    pub memory: Option<u32>,

    /// User name
    #[arg(short, long)]
    pub user: Option<String>,

    /// Detach mode: print the task and exit
    #[arg(short = 'D', long)]
    pub detach: bool,

    /// Environment variable to pass to the task (NAME=value, repeatable)
    #[arg(short = 'E', long = "envvar", value_name = "NAME=VALUE")]
    pub envvars: Vec<String>,

    /// Give up if the task is not running after this many seconds
    #[arg(long, value_name = "SECS")]
    pub wait_timeout: Option<u64>,

    /// Command to run inside the task
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl RunArgs {
    /// Validate everything that can be checked without a remote call.
    ///
    /// # Errors
    ///
    /// Returns an error for combined target selectors, malformed env var
    /// pairs, or a missing command.
    pub fn validate(&self) -> Result<(RunTarget, BTreeMap<String, String>, OneoffRequest)> {
        let target = select_target(
            self.environment.as_deref(),
            self.heritage_name.as_deref(),
            self.branch.as_deref(),
        )?;
        let overrides = check_env_vars(&self.envvars)?;
        let request = OneoffRequest::new(&self.command.join(" "), self.detach, BTreeMap::new())?
            .with_memory(self.memory)
            .with_user(self.user.clone());
        Ok((target, overrides, request))
    }

    fn policy(&self) -> PollPolicy {
        PollPolicy {
            timeout: self.wait_timeout.map(Duration::from_secs),
            ..PollPolicy::default()
        }
    }
}

/// Resolve the heritage name and the base env vars for a target.
async fn resolve_target(
    app: &AppContext,
    target: RunTarget,
    dir: &Path,
) -> Result<(String, BTreeMap<String, String>)> {
    match target {
        RunTarget::Heritage(name) => Ok((name, BTreeMap::new())),
        RunTarget::Environment(env) => {
            let config = load_heritage_config(dir)?;
            let def = config.environment(&env)?;
            let base = if env.is_empty() {
                BTreeMap::new()
            } else {
                def.run_vars()
            };
            Ok((def.name.clone(), base))
        }
        RunTarget::Branch(branch) => {
            let review = load_review_definition(dir)?;
            let name = review_heritage(&app.client, &review.group_name, &branch).await?;
            Ok((name, BTreeMap::new()))
        }
    }
}

/// Run `bcn run [-e ENV | -H NAME | -b BRANCH] [options] COMMAND...`.
///
/// # Errors
///
/// Returns an error if validation, heritage resolution, or the run fails.
pub async fn run(app: &AppContext, args: &RunArgs) -> Result<()> {
    let (target, overrides, mut request) = args.validate()?;
    let dir = std::env::current_dir().context("cannot determine current directory")?;
    let (heritage, mut env_vars) = resolve_target(app, target, &dir).await?;
    env_vars.extend(overrides);
    request.env_vars = env_vars;
    tracing::debug!(%heritage, command = %request.command, "resolved run target");

    let reporter = app.reporter();
    let broker = SshBroker::new(&app.ssh, &app.fs, &app.runner, &reporter);
    let op = RunOneoffOperation::new(
        &app.client,
        &app.sleeper,
        &broker,
        &reporter,
        heritage,
        request,
    )
    .with_policy(args.policy());
    execute(&op).await?;
    Ok(())
}
