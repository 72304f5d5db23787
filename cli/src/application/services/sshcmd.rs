//! `bcn ssh`: sign the local key against a district and shell into an
//! instance by IP.

use anyhow::{Context, Result};

use crate::application::operation::{Operation, Outcome};
use crate::application::ports::ApiPost;
use crate::application::services::ssh_session::{SessionOpener, SshTarget};
use crate::domain::error::RunError;
use crate::domain::oneoff::DistrictResponse;

pub struct SshcmdOperation<'a, A, S> {
    api: &'a A,
    ssh: &'a S,
    district: String,
    ip: String,
}

impl<'a, A: ApiPost, S: SessionOpener> SshcmdOperation<'a, A, S> {
    #[must_use]
    pub fn new(api: &'a A, ssh: &'a S, district: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            api,
            ssh,
            district: district.into(),
            ip: ip.into(),
        }
    }

    async fn connect(&self) -> Result<Outcome> {
        let resp = self
            .api
            .post(&format!("/districts/{}/sign_public_key", self.district), None)
            .await?;
        let resp: DistrictResponse =
            serde_json::from_slice(&resp).context("decoding district response")?;
        let certificate = resp.certificate.ok_or(RunError::MissingCertificate)?;

        let target = SshTarget {
            ip: &self.ip,
            bastion_ip: resp.district.bastion()?,
            certificate: &certificate,
        };
        self.ssh.open(&target, "").await?;
        Ok(Outcome::Ok)
    }
}

impl<A: ApiPost, S: SessionOpener> Operation for SshcmdOperation<'_, A, S> {
    async fn run(&self) -> Outcome {
        if self.district.is_empty() {
            return Outcome::error("district name is required");
        }
        if self.ip.is_empty() {
            return Outcome::error("ip is required");
        }
        self.connect().await.into()
    }
}
