//! `bcn login-info`.

use barcelona_cli::application::services::login_info::LoginInfoOperation;
use barcelona_cli::application::{Operation, Outcome};
use barcelona_cli::domain::Login;

use crate::mocks::{FixedLogin, RecordingOutput};

#[tokio::test]
async fn test_presents_effective_login() {
    let store = FixedLogin(Login {
        auth: "github".into(),
        endpoint: "https://bcn.example.com".into(),
        ..Login::default()
    });
    let out = RecordingOutput::default();

    let outcome = LoginInfoOperation::new(&store, &out).run().await;

    assert_eq!(outcome, Outcome::Ok);
    assert_eq!(out.events(), vec!["login:https://bcn.example.com".to_string()]);
}
