//! Application service: one-off submission.

use anyhow::{Context, Result};

use crate::application::ports::ApiPost;
use crate::domain::oneoff::{Oneoff, OneoffRequest, OneoffResponse};

/// A freshly submitted task and the certificate issued with it.
#[derive(Debug, Clone)]
pub struct LaunchedOneoff {
    pub oneoff: Oneoff,
    /// Absent for detached runs on some API versions.
    pub certificate: Option<String>,
}

/// Submit `request` as a one-off of `heritage`.
///
/// # Errors
///
/// Returns an error if the request cannot be encoded, the API call fails, or
/// the response is not a one-off.
pub async fn launch_oneoff(
    api: &impl ApiPost,
    heritage: &str,
    request: &OneoffRequest,
) -> Result<LaunchedOneoff> {
    let body = serde_json::to_vec(request).context("encoding one-off request")?;
    let resp = api
        .post(&format!("/heritages/{heritage}/oneoffs"), Some(body))
        .await?;
    let resp: OneoffResponse =
        serde_json::from_slice(&resp).context("decoding one-off response")?;

    tracing::info!(
        heritage,
        id = resp.oneoff.id,
        interactive = request.interactive,
        "one-off submitted"
    );

    Ok(LaunchedOneoff {
        oneoff: resp.oneoff,
        certificate: resp.certificate,
    })
}
