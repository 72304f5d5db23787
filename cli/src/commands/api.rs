//! `bcn api`: call an arbitrary API endpoint and print the JSON response.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::execute;
use crate::application::services::api_call::ApiOperation;

/// Arguments for the api command.
#[derive(Args, Debug)]
pub struct ApiArgs {
    /// HTTP method (GET, POST, PATCH, PUT, DELETE)
    pub method: Option<String>,

    /// API path, e.g. /districts
    pub path: Option<String>,

    /// JSON request body
    pub body: Option<String>,
}

/// Run `bcn api METHOD PATH [BODY]`.
///
/// # Errors
///
/// Returns an error if an argument is missing or the API call fails.
pub async fn run(app: &AppContext, args: ApiArgs) -> Result<()> {
    let reporter = app.reporter();
    let op = ApiOperation::new(
        &app.client,
        &reporter,
        args.method.unwrap_or_default(),
        args.path.unwrap_or_default(),
        args.body,
    );
    execute(&op).await?;
    Ok(())
}
