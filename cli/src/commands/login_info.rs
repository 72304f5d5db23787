//! `bcn login-info`: show the effective login.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::execute;
use crate::application::services::login_info::LoginInfoOperation;

/// Run `bcn login-info`.
///
/// # Errors
///
/// Propagates `OperationFailed` from the operation.
pub async fn run(app: &AppContext) -> Result<()> {
    let reporter = app.reporter();
    execute(&LoginInfoOperation::new(&app.login_store, &reporter)).await?;
    Ok(())
}
