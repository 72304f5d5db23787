//! One-off submission payload and response decoding.

#![allow(clippy::expect_used)]

use std::collections::BTreeMap;

use barcelona_cli::application::Method;
use barcelona_cli::application::services::launcher::launch_oneoff;
use barcelona_cli::domain::oneoff::{OneoffRequest, TaskStatus};
use serde_json::json;

use crate::mocks::{CERT, ScriptedApi, launch_response};

#[tokio::test]
async fn test_posts_payload_to_heritage_oneoffs() {
    let api = ScriptedApi::new().reply(launch_response("PENDING"));
    let env = BTreeMap::from([("RAILS_ENV".to_string(), "production".to_string())]);
    let request = OneoffRequest::new("rails console", false, env).expect("request");

    let launched = launch_oneoff(&api, "web", &request).await.expect("launch");

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::Post);
    assert_eq!(calls[0].path, "/heritages/web/oneoffs");
    assert_eq!(
        calls[0].body_json(),
        json!({
            "interactive": true,
            "command": "rails console",
            "env_vars": {"RAILS_ENV": "production"}
        })
    );
    assert_eq!(launched.oneoff.id, 42);
    assert_eq!(launched.oneoff.status, TaskStatus::Pending);
    assert_eq!(launched.certificate.as_deref(), Some(CERT));
}

#[tokio::test]
async fn test_payload_includes_memory_and_user_when_set() {
    let api = ScriptedApi::new().reply(launch_response("PENDING"));
    let request = OneoffRequest::new("rake db:migrate", true, BTreeMap::new())
        .expect("request")
        .with_memory(Some(1024))
        .with_user(Some("app".into()));

    launch_oneoff(&api, "web", &request).await.expect("launch");

    let body = api.calls()[0].body_json();
    assert_eq!(body["interactive"], json!(false));
    assert_eq!(body["memory"], json!(1024));
    assert_eq!(body["user"], json!("app"));
}

#[tokio::test]
async fn test_undecodable_response_is_error() {
    let api = ScriptedApi::new().reply(json!({"unexpected": true}));
    let request = OneoffRequest::new("bash", false, BTreeMap::new()).expect("request");
    let err = launch_oneoff(&api, "web", &request).await.expect_err("decode");
    assert!(format!("{err:#}").contains("decoding one-off response"), "got: {err:#}");
}
