//! Domain types for local configuration: the login record and the project
//! files (`barcelona.yml`, `barcelona-review.yml`).
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::nullable::null_as_default;

// ── Constants ────────────────────────────────────────────────────────────────

/// Prefix prepended to every API path.
pub const API_PATH_PREFIX: &str = "/v1";

/// Project file holding heritage environments.
pub const HERITAGE_CONFIG_FILE: &str = "barcelona.yml";

/// Project file holding the review-app definition.
pub const REVIEW_CONFIG_FILE: &str = "barcelona-review.yml";

// ── Login ────────────────────────────────────────────────────────────────────

/// Credentials stored in `~/.bcn/login` after `bcn login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Login {
    /// Auth backend: `github` or `vault`.
    pub auth: String,
    pub token: String,
    pub vault_token: String,
    /// Base URL of the Barcelona API, without the `/v1` prefix.
    pub endpoint: String,
}

/// HTTP header carrying the token for the configured backend, if any.
#[must_use]
pub fn auth_header(login: &Login) -> Option<(&'static str, &str)> {
    match login.auth.as_str() {
        "github" if !login.token.is_empty() => Some(("X-Barcelona-Token", login.token.as_str())),
        "vault" => Some(("X-Vault-Token", login.token.as_str())),
        _ => None,
    }
}

/// Token exchange performed by `bcn login`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthBackend {
    /// GitHub token traded for a Barcelona token at `POST /v1/login`.
    Github,
    /// GitHub token traded for a Vault client token at the Vault server.
    Vault,
}

impl AuthBackend {
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownAuthBackend` for anything but `github`
    /// or `vault`.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name {
            "github" => Ok(Self::Github),
            "vault" => Ok(Self::Vault),
            _ => Err(ConfigError::UnknownAuthBackend),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Vault => "vault",
        }
    }
}

/// The Barcelona account behind a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub token: String,
    /// Registered SSH public key; empty until one is uploaded.
    #[serde(deserialize_with = "null_as_default")]
    pub public_key: String,
}

/// Body of `POST /v1/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserResponse {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VaultAuth {
    #[serde(deserialize_with = "null_as_default")]
    pub client_token: String,
}

/// Body of the Vault `auth/github/login` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VaultAuthResponse {
    pub auth: VaultAuth,
}

// ── barcelona.yml ────────────────────────────────────────────────────────────

/// Extra variables injected into every `bcn run` for an environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunEnv {
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}

/// One entry under `environments:`. Only the fields `bcn run` needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentDef {
    pub name: String,
    #[serde(default)]
    pub run_env: Option<RunEnv>,
}

/// Top-level shape of `barcelona.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeritageConfig {
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentDef>,
}

impl HeritageConfig {
    /// Look up an environment by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvironmentInvalid` if no such environment exists.
    pub fn environment(&self, name: &str) -> Result<&EnvironmentDef, ConfigError> {
        self.environments
            .get(name)
            .ok_or(ConfigError::EnvironmentInvalid)
    }
}

impl EnvironmentDef {
    /// Variables from `run_env.vars`, empty when absent.
    #[must_use]
    pub fn run_vars(&self) -> BTreeMap<String, String> {
        self.run_env
            .as_ref()
            .map(|env| env.vars.clone())
            .unwrap_or_default()
    }
}

// ── barcelona-review.yml ─────────────────────────────────────────────────────

/// The subset of the review-app definition used to locate review apps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewDefinition {
    #[serde(rename = "group")]
    pub group_name: String,
}
