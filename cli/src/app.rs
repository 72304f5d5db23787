//! Application context: unified state passed to every command handler.
//!
//! `AppContext` owns the output context, the API client and the local
//! infrastructure adapters. Command handlers borrow what they need from it.

use anyhow::Result;

use crate::application::ports::{Confirmer, LoginStore, Prompter};
use crate::infra::api_client::BarcelonaClient;
use crate::infra::clock::TokioSleeper;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::{BcnPaths, FileLoginStore, SshSettings};
use crate::infra::fs::LocalFs;
use crate::output::{OutputContext, TerminalReporter};

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Dump HTTP traffic and the ssh command line to stderr.
    pub debug: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    pub debug: bool,
    pub paths: BcnPaths,
    pub login_store: FileLoginStore,
    pub client: BarcelonaClient,
    pub ssh: SshSettings,
    pub runner: TokioCommandRunner,
    pub sleeper: TokioSleeper,
    pub fs: LocalFs,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be resolved or the
    /// HTTP client cannot be built.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let paths = BcnPaths::from_env()?;
        let login_store = FileLoginStore::new(&paths);
        let login = login_store.load_login();
        tracing::debug!(endpoint = %login.endpoint, auth = %login.auth, "loaded login");

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            debug: flags.debug,
            client: BarcelonaClient::new(login, flags.debug)?,
            ssh: SshSettings::new(paths.clone(), flags.debug),
            paths,
            login_store,
            runner: TokioCommandRunner,
            sleeper: TokioSleeper,
            fs: LocalFs,
        })
    }

    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}

impl Confirmer for AppContext {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(confirmed)
    }
}

impl Prompter for AppContext {
    fn ask(&self, prompt: &str, secret: bool) -> Result<String> {
        let answer = if secret {
            dialoguer::Password::new().with_prompt(prompt).interact()?
        } else {
            dialoguer::Input::<String>::new()
                .with_prompt(prompt)
                .interact_text()?
        };
        Ok(answer.trim().to_string())
    }
}
