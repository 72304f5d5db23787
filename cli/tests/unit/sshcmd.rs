//! Direct SSH to a district's container instance.

#![allow(clippy::expect_used)]

use barcelona_cli::application::services::sshcmd::SshcmdOperation;
use barcelona_cli::application::{Method, Operation, Outcome};
use serde_json::json;

use crate::mocks::{BASTION, CERT, RecordingOpener, ScriptedApi, district};

#[tokio::test]
async fn test_signs_key_then_opens_login_shell() {
    let api = ScriptedApi::new().reply(json!({"district": district(), "certificate": CERT}));
    let ssh = RecordingOpener::default();

    let outcome = SshcmdOperation::new(&api, &ssh, "default", "10.0.0.7").run().await;

    assert_eq!(outcome, Outcome::Ok);
    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::Post);
    assert_eq!(calls[0].path, "/districts/default/sign_public_key");
    assert_eq!(calls[0].body, None);

    let sessions = ssh.sessions();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].ip, "10.0.0.7");
    assert_eq!(sessions[0].bastion_ip, BASTION);
    assert_eq!(sessions[0].certificate, CERT);
    assert_eq!(sessions[0].command, "");
}

#[tokio::test]
async fn test_missing_arguments_make_no_calls() {
    let api = ScriptedApi::new();
    let ssh = RecordingOpener::default();

    let outcome = SshcmdOperation::new(&api, &ssh, "", "10.0.0.7").run().await;
    assert_eq!(outcome.message(), Some("district name is required"));

    let outcome = SshcmdOperation::new(&api, &ssh, "default", "").run().await;
    assert_eq!(outcome.message(), Some("ip is required"));

    assert!(api.calls().is_empty());
    assert!(ssh.sessions().is_empty());
}

#[tokio::test]
async fn test_sign_failure_surfaces_api_message() {
    let api = ScriptedApi::new().fail("District not found");
    let ssh = RecordingOpener::default();

    let outcome = SshcmdOperation::new(&api, &ssh, "nope", "10.0.0.7").run().await;

    assert_eq!(outcome, Outcome::Error("District not found".into()));
    assert!(ssh.sessions().is_empty());
}
