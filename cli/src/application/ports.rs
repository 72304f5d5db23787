//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! Each component asks only for the capabilities it uses, so a fake needs
//! to implement just those. This file imports only from `crate::domain` -
//! never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{Heritage, Login, Oneoff, User};

// ── HTTP Method ───────────────────────────────────────────────────────────────

/// HTTP verbs accepted by the Barcelona API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PATCH" => Ok(Self::Patch),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => anyhow::bail!("unsupported method: {s}"),
        }
    }
}

// ── API Ports ─────────────────────────────────────────────────────────────────

/// Arbitrary verb + path call. Non-2xx responses surface as `ApiError`.
#[allow(async_fn_in_trait)]
pub trait ApiRequester {
    /// Send `body` to `path` (relative to the versioned API root) and
    /// return the raw response bytes.
    async fn request(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>>;
}

/// `GET` access to the API.
#[allow(async_fn_in_trait)]
pub trait ApiGet {
    async fn get(&self, path: &str) -> Result<Vec<u8>>;
}

/// `POST` access to the API.
#[allow(async_fn_in_trait)]
pub trait ApiPost {
    async fn post(&self, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>>;
}

/// `DELETE` access to the API.
#[allow(async_fn_in_trait)]
pub trait ApiDelete {
    async fn delete(&self, path: &str) -> Result<Vec<u8>>;
}

/// Token exchanges made before any login is stored, and the key upload
/// that follows them.
#[allow(async_fn_in_trait)]
pub trait Authenticator {
    /// Trade a GitHub token for a Barcelona user at `endpoint`.
    async fn login_with_github(&self, endpoint: &str, github_token: &str) -> Result<User>;
    /// Trade a GitHub token for a Vault client token at `vault_url`.
    async fn login_with_vault(&self, vault_url: &str, github_token: &str) -> Result<String>;
    /// `PATCH /user` with the public key, authenticated as `login`.
    async fn register_public_key(&self, login: &Login, public_key: &str) -> Result<()>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program with inherited stdin/stdout/stderr and return its exit
    /// status. Nothing is captured; the operator drives the terminal.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the handful of raw file operations the core needs.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    /// Create or truncate `path` and write `content`.
    fn write(&self, path: &Path, content: &[u8]) -> Result<()>;
}

// ── SSH Configuration Port ────────────────────────────────────────────────────

/// Where the SSH identity lives and whether debug output is wanted.
pub trait SshConfig {
    /// Path the short-lived certificate is written to before each session.
    fn cert_path(&self) -> PathBuf;
    /// Private key used for both the bastion hop and the instance login.
    fn private_key_path(&self) -> PathBuf;
    /// Public half of the key pair, registered with the API at login.
    fn public_key_path(&self) -> PathBuf;
    fn is_debug(&self) -> bool;
}

// ── Timing Port ───────────────────────────────────────────────────────────────

/// Blocking wait between polls.
#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait: no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit a debug-mode detail line. Never suppressed by quiet mode.
    fn debug(&self, message: &str);
}

// ── Presentation Port ─────────────────────────────────────────────────────────

/// Renders API results for the operator.
pub trait Presenter {
    fn oneoff(&self, oneoff: &Oneoff);
    fn heritage(&self, heritage: &Heritage);
    /// Raw JSON response body, pretty-printed.
    fn json(&self, body: &[u8]);
    fn login(&self, login: &Login);
}

// ── Interaction Port ──────────────────────────────────────────────────────────

/// Yes/no prompt.
pub trait Confirmer {
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Free-text prompt.
pub trait Prompter {
    /// Ask for a value. `secret` hides the input.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails.
    fn ask(&self, prompt: &str, secret: bool) -> Result<String>;
}

// ── Login Store Port ──────────────────────────────────────────────────────────

/// Read access to the stored login.
pub trait LoginStore {
    /// Load the effective login. Missing or unreadable files yield an empty
    /// login rather than an error.
    fn load_login(&self) -> Login;
}

/// Persists the login written by `bcn login`.
pub trait LoginWriter {
    /// # Errors
    ///
    /// Returns an error if the login file cannot be written.
    fn save_login(&self, login: &Login) -> Result<()>;
}
