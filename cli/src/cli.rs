//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Command-line client for the Barcelona platform
#[derive(Parser, Debug)]
#[command(
    name = "bcn",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Dump API traffic and the ssh command line to stderr
    #[arg(short, long, global = true, env = "BCN_DEBUG")]
    pub debug: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Login Barcelona
    Login(commands::login::LoginArgs),

    /// Run command inside Barcelona environment
    Run(commands::run::RunArgs),

    /// SSH into Barcelona container instance
    Ssh(commands::ssh::SshArgs),

    /// Call Barcelona API
    Api(commands::api::ApiArgs),

    /// Manage heritages
    #[command(subcommand)]
    App(commands::app::AppCommand),

    /// Show the stored login
    LoginInfo,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the context cannot be built or the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            debug,
            quiet,
            no_color,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            no_color,
            quiet,
            debug,
        })?;
        match command {
            Command::Login(args) => commands::login::run(&app, args).await,
            Command::Run(args) => commands::run::run(&app, &args).await,
            Command::Ssh(args) => commands::ssh::run(&app, args).await,
            Command::Api(args) => commands::api::run(&app, args).await,
            Command::App(cmd) => commands::app::run(&app, cmd).await,
            Command::LoginInfo => commands::login_info::run(&app).await,
        }
    }
}
