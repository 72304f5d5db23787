//! One-off task, district and container-instance models.
//!
//! Pure types only: decoded from API responses and consumed by the
//! launcher, poller and SSH broker services.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::RunError;
use crate::domain::nullable::null_as_default;

// ── Task status ───────────────────────────────────────────────────────────────

/// Lifecycle status of a one-off task as reported by the API.
///
/// Anything the API sends that is not one of the known values is kept
/// verbatim in `Unknown` so it can be reported back to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TaskStatus {
    Pending,
    Running,
    Inactive,
    Stopped,
    Unknown(String),
}

impl From<String> for TaskStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDING" => Self::Pending,
            "RUNNING" => Self::Running,
            "INACTIVE" => Self::Inactive,
            "STOPPED" => Self::Stopped,
            _ => Self::Unknown(raw),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("PENDING"),
            Self::Running => f.write_str("RUNNING"),
            Self::Inactive => f.write_str("INACTIVE"),
            Self::Stopped => f.write_str("STOPPED"),
            Self::Unknown(raw) => f.write_str(raw),
        }
    }
}

// ── Districts and container instances ─────────────────────────────────────────

/// Backend compute node registered in a district.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerInstance {
    #[serde(deserialize_with = "null_as_default")]
    pub container_instance_arn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub private_ip_address: String,
    pub ec2_instance_id: Option<String>,
    pub status: Option<String>,
}

/// Network/compute domain fronted by a bastion host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct District {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub region: Option<String>,
    pub bastion_ip: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub container_instances: Vec<ContainerInstance>,
}

impl District {
    /// Bastion address, or an error naming the district when it has none.
    ///
    /// # Errors
    ///
    /// Returns `RunError::NoBastion` if the API did not report a bastion IP.
    pub fn bastion(&self) -> Result<&str, RunError> {
        self.bastion_ip
            .as_deref()
            .filter(|ip| !ip.is_empty())
            .ok_or_else(|| RunError::NoBastion(self.name.clone()))
    }
}

/// Find the instance whose ARN exactly matches `arn`. First match wins.
///
/// The fleet view embedded in a response can lag behind task placement, so
/// a miss is reported as `ContainerNotFound` rather than retried.
///
/// # Errors
///
/// Returns `RunError::ContainerNotFound` when no instance carries `arn`.
pub fn find_container_instance<'a>(
    instances: &'a [ContainerInstance],
    arn: &str,
) -> Result<&'a ContainerInstance, RunError> {
    instances
        .iter()
        .find(|ci| ci.container_instance_arn == arn)
        .ok_or(RunError::ContainerNotFound)
}

// ── One-off tasks ─────────────────────────────────────────────────────────────

/// A single ad hoc command execution against a heritage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Oneoff {
    pub id: u64,
    #[serde(default)]
    pub task_arn: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub command: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub exit_code: Option<serde_json::Value>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interactive_run_command: String,
    #[serde(default)]
    pub container_instance_arn: Option<String>,
    #[serde(default)]
    pub container_name: Option<String>,
    #[serde(default)]
    pub memory: Option<u32>,
    #[serde(default)]
    pub district: Option<District>,
}

/// Body of `POST /heritages/{name}/oneoffs` and
/// `GET /districts/{d}/heritages/{h}/oneoffs/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct OneoffResponse {
    pub oneoff: Oneoff,
    #[serde(default)]
    pub certificate: Option<String>,
}

/// Body of `POST /districts/{name}/sign_public_key`.
#[derive(Debug, Clone, Deserialize)]
pub struct DistrictResponse {
    pub district: District,
    #[serde(default)]
    pub certificate: Option<String>,
}

/// Payload submitted to create a one-off.
///
/// `env_vars` is ordered so the serialized body is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OneoffRequest {
    pub interactive: bool,
    pub command: String,
    pub env_vars: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl OneoffRequest {
    /// Build a request for `command`. `detach` submits a non-interactive task.
    ///
    /// # Errors
    ///
    /// Returns `RunError::CommandRequired` if `command` is blank.
    pub fn new(
        command: &str,
        detach: bool,
        env_vars: BTreeMap<String, String>,
    ) -> Result<Self, RunError> {
        if command.trim().is_empty() {
            return Err(RunError::CommandRequired);
        }
        Ok(Self {
            interactive: !detach,
            command: command.to_string(),
            env_vars,
            memory: None,
            user: None,
        })
    }

    /// Memory override in MB. Zero means "use the heritage default".
    #[must_use]
    pub fn with_memory(mut self, memory: Option<u32>) -> Self {
        self.memory = memory.filter(|m| *m > 0);
        self
    }

    /// User override. An empty name means "use the image default".
    #[must_use]
    pub fn with_user(mut self, user: Option<String>) -> Self {
        self.user = user.filter(|u| !u.is_empty());
        self
    }
}

/// API path of a single one-off under its district and heritage.
#[must_use]
pub fn oneoff_path(district: &str, heritage: &str, id: u64) -> String {
    format!("/districts/{district}/heritages/{heritage}/oneoffs/{id}")
}
