//! `bcn login`: store credentials for an endpoint and register an SSH key.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::execute;
use crate::application::services::login::{LocalKeyPair, LoginOperation, LoginRequest};

/// Arguments for the login command.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Barcelona API endpoint, e.g. https://barcelona.example.com
    pub endpoint: Option<String>,

    /// GitHub access token with read:org permission (asked for when omitted)
    pub github_token: Option<String>,

    /// Auth backend: github or vault
    #[arg(short, long, default_value = "github")]
    pub auth: String,

    /// Vault server URL (vault backend only; asked for when omitted)
    #[arg(long, value_name = "URL")]
    pub vault_url: Option<String>,
}

impl LoginArgs {
    #[must_use]
    pub fn request(self) -> LoginRequest {
        LoginRequest {
            endpoint: self.endpoint.unwrap_or_default(),
            backend: self.auth,
            github_token: self.github_token.unwrap_or_default(),
            vault_url: self.vault_url.unwrap_or_default(),
        }
    }
}

/// Run `bcn login ENDPOINT [GITHUB_TOKEN]`.
///
/// # Errors
///
/// Returns an error if the token exchange, the login file write, key
/// generation, or key registration fails.
pub async fn run(app: &AppContext, args: LoginArgs) -> Result<()> {
    let reporter = app.reporter();
    let keys = LocalKeyPair::new(&app.ssh, &app.fs, &app.runner);
    let op = LoginOperation::new(
        &app.client,
        &app.login_store,
        &keys,
        app,
        &reporter,
        args.request(),
    );
    execute(&op).await?;
    Ok(())
}
