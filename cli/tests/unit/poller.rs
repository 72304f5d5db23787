//! Status poller: PENDING loops, RUNNING returns, everything else is fatal.

#![allow(clippy::expect_used)]

use std::time::Duration;

use barcelona_cli::application::services::poller::{POLL_INTERVAL, PollPolicy, wait_until_running};
use barcelona_cli::domain::RunError;
use barcelona_cli::domain::oneoff::TaskStatus;

use crate::mocks::{CountingSleeper, ScriptedApi, status_response};

const PATH: &str = "/districts/default/heritages/web/oneoffs/42";

#[tokio::test]
async fn test_running_first_poll_does_not_sleep() {
    let api = ScriptedApi::new().reply(status_response("RUNNING"));
    let sleeper = CountingSleeper::default();

    let oneoff = wait_until_running(&api, &sleeper, PATH, &PollPolicy::default())
        .await
        .expect("running");

    assert_eq!(oneoff.status, TaskStatus::Running);
    assert!(sleeper.sleeps().is_empty());
    assert_eq!(api.paths(), vec![PATH.to_string()]);
}

#[tokio::test]
async fn test_pending_sleeps_between_polls() {
    let api = ScriptedApi::new()
        .reply(status_response("PENDING"))
        .reply(status_response("PENDING"))
        .reply(status_response("RUNNING"));
    let sleeper = CountingSleeper::default();

    wait_until_running(&api, &sleeper, PATH, &PollPolicy::default())
        .await
        .expect("running");

    assert_eq!(sleeper.sleeps(), vec![POLL_INTERVAL, POLL_INTERVAL]);
    assert_eq!(api.calls().len(), 3);
}

#[tokio::test]
async fn test_stopped_is_fatal_and_named() {
    let api = ScriptedApi::new()
        .reply(status_response("PENDING"))
        .reply(status_response("STOPPED"));
    let sleeper = CountingSleeper::default();

    let err = wait_until_running(&api, &sleeper, PATH, &PollPolicy::default())
        .await
        .expect_err("stopped");

    assert_eq!(
        err.downcast_ref::<RunError>(),
        Some(&RunError::UnexpectedStatus("STOPPED".into()))
    );
    assert_eq!(err.to_string(), "Unexpected task status STOPPED");
}

#[tokio::test]
async fn test_inactive_and_unknown_statuses_are_fatal() {
    for status in ["INACTIVE", "PROVISIONING"] {
        let api = ScriptedApi::new().reply(status_response(status));
        let err = wait_until_running(&api, &CountingSleeper::default(), PATH, &PollPolicy::default())
            .await
            .expect_err("fatal");
        assert!(err.to_string().ends_with(status), "got: {err}");
    }
}

#[tokio::test]
async fn test_timeout_bounds_the_wait() {
    let api = ScriptedApi::new()
        .reply(status_response("PENDING"))
        .reply(status_response("PENDING"))
        .reply(status_response("PENDING"));
    let sleeper = CountingSleeper::default();
    let policy = PollPolicy {
        interval: Duration::from_secs(3),
        timeout: Some(Duration::from_secs(6)),
    };

    let err = wait_until_running(&api, &sleeper, PATH, &policy)
        .await
        .expect_err("timed out");

    assert_eq!(err.downcast_ref::<RunError>(), Some(&RunError::WaitTimedOut(6)));
    assert_eq!(sleeper.sleeps().len(), 2);
}

#[tokio::test]
async fn test_api_error_propagates() {
    let api = ScriptedApi::new().fail("Heritage not found");
    let err = wait_until_running(&api, &CountingSleeper::default(), PATH, &PollPolicy::default())
        .await
        .expect_err("api error");
    assert_eq!(err.to_string(), "Heritage not found");
}
