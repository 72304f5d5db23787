//! `bcn app`: manage heritages.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::execute;
use crate::application::services::heritage::{AppAction, AppOperation};

/// App subcommands.
#[derive(Subcommand, Debug)]
pub enum AppCommand {
    /// Show a heritage
    Show {
        /// Heritage name
        name: Option<String>,
    },
    /// Delete a heritage
    Delete {
        /// Heritage name
        name: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long)]
        no_confirm: bool,
    },
}

/// Run `bcn app show|delete HERITAGE_NAME`.
///
/// # Errors
///
/// Returns an error if the heritage cannot be fetched or deleted.
pub async fn run(app: &AppContext, cmd: AppCommand) -> Result<()> {
    let (name, action) = match cmd {
        AppCommand::Show { name } => (name, AppAction::Show),
        AppCommand::Delete { name, no_confirm } => (name, AppAction::Delete { no_confirm }),
    };
    let reporter = app.reporter();
    let op = AppOperation::new(&app.client, app, &reporter, name.unwrap_or_default(), action);
    execute(&op).await?;
    Ok(())
}
