//! Heritage and review-app models, and `bcn run` target selection.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::error::RunError;
use crate::domain::nullable::null_as_default;

// ── Heritage ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScheduledTask {
    #[serde(deserialize_with = "null_as_default")]
    pub schedule: String,
    #[serde(deserialize_with = "null_as_default")]
    pub command: String,
}

/// A deployable application definition within a district.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Heritage {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_name: String,
    pub image_tag: Option<String>,
    pub version: Option<u64>,
    pub before_deploy: Option<String>,
    pub token: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub scheduled_tasks: Vec<ScheduledTask>,
    #[serde(deserialize_with = "null_as_default")]
    pub env_vars: BTreeMap<String, String>,
}

/// Body of `GET /heritages/{name}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeritageResponse {
    #[serde(default)]
    pub heritage: Option<Heritage>,
}

// ── Review apps ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeritageRef {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// A branch-scoped review environment backed by its own heritage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewApp {
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_default")]
    pub heritage: HeritageRef,
    pub domain: Option<String>,
}

/// Body of `GET /review_groups/{group}/apps`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewAppResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_apps: Vec<ReviewApp>,
}

/// Heritage name of the first review app whose subject is `branch`.
///
/// # Errors
///
/// Returns `RunError::BranchNotFound` when no review app matches.
pub fn heritage_for_branch(apps: &[ReviewApp], branch: &str) -> Result<String, RunError> {
    apps.iter()
        .find(|app| app.subject == branch)
        .map(|app| app.heritage.name.clone())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| RunError::BranchNotFound(branch.to_string()))
}

// ── Target selection ──────────────────────────────────────────────────────────

/// How `bcn run` picks the heritage to run in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunTarget {
    /// Environment name from `barcelona.yml` (empty means the unnamed default).
    Environment(String),
    /// Heritage named directly.
    Heritage(String),
    /// Review app whose subject is this branch.
    Branch(String),
}

/// Validate that at most one selector is set and return it.
///
/// # Errors
///
/// Returns `RunError::EnvironmentAndHeritage` or `RunError::BranchExclusive`
/// when selectors are combined.
pub fn select_target(
    environment: Option<&str>,
    heritage: Option<&str>,
    branch: Option<&str>,
) -> Result<RunTarget, RunError> {
    let environment = environment.filter(|s| !s.is_empty());
    let heritage = heritage.filter(|s| !s.is_empty());
    let branch = branch.filter(|s| !s.is_empty());

    if environment.is_some() && heritage.is_some() {
        return Err(RunError::EnvironmentAndHeritage);
    }
    if branch.is_some() && (environment.is_some() || heritage.is_some()) {
        return Err(RunError::BranchExclusive);
    }

    Ok(match (environment, heritage, branch) {
        (_, Some(h), _) => RunTarget::Heritage(h.to_string()),
        (_, _, Some(b)) => RunTarget::Branch(b.to_string()),
        (e, None, None) => RunTarget::Environment(e.unwrap_or_default().to_string()),
    })
}
