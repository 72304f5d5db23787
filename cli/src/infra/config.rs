//! On-disk configuration: the `~/.bcn` directory, the stored login, and the
//! project files read from the working directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{LoginStore, LoginWriter, SshConfig};
use crate::domain::config::{HERITAGE_CONFIG_FILE, REVIEW_CONFIG_FILE};
use crate::domain::error::ConfigError;
use crate::domain::{HeritageConfig, Login, ReviewDefinition};

/// Overrides the `~/.bcn` directory.
pub const CONFIG_DIR_ENV: &str = "BCN_CONFIG_DIR";

/// Overrides the endpoint stored in the login file.
pub const ENDPOINT_ENV: &str = "BARCELONA_ENDPOINT";

/// Locations of the files under `~/.bcn`.
#[derive(Debug, Clone)]
pub struct BcnPaths {
    root: PathBuf,
}

impl BcnPaths {
    /// Resolve the config directory from `BCN_CONFIG_DIR` or the home dir.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if neither is available.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
            && !dir.is_empty()
        {
            return Ok(Self::with_root(dir));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::with_root(home.join(".bcn")))
    }

    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn login_file(&self) -> PathBuf {
        self.root.join("login")
    }

    #[must_use]
    pub fn private_key(&self) -> PathBuf {
        self.root.join("id_ecdsa")
    }

    #[must_use]
    pub fn public_key(&self) -> PathBuf {
        self.root.join("id_ecdsa.pub")
    }

    #[must_use]
    pub fn certificate(&self) -> PathBuf {
        self.root.join("id_ecdsa-cert.pub")
    }
}

/// `SshConfig` backed by `BcnPaths`.
pub struct SshSettings {
    paths: BcnPaths,
    debug: bool,
}

impl SshSettings {
    #[must_use]
    pub fn new(paths: BcnPaths, debug: bool) -> Self {
        Self { paths, debug }
    }
}

impl SshConfig for SshSettings {
    fn cert_path(&self) -> PathBuf {
        self.paths.certificate()
    }

    fn private_key_path(&self) -> PathBuf {
        self.paths.private_key()
    }

    fn public_key_path(&self) -> PathBuf {
        self.paths.public_key()
    }

    fn is_debug(&self) -> bool {
        self.debug
    }
}

/// Mode of the login file; it holds an API token.
#[cfg(unix)]
const LOGIN_FILE_MODE: u32 = 0o600;

/// Reads and writes `~/.bcn/login`. Reads apply `BARCELONA_ENDPOINT`.
pub struct FileLoginStore {
    path: PathBuf,
}

impl FileLoginStore {
    #[must_use]
    pub fn new(paths: &BcnPaths) -> Self {
        Self {
            path: paths.login_file(),
        }
    }

    fn read(&self) -> Result<Login> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing {}", self.path.display()))
    }
}

impl LoginStore for FileLoginStore {
    fn load_login(&self) -> Login {
        let mut login = if self.path.exists() {
            self.read().unwrap_or_else(|e| {
                tracing::warn!("ignoring login file: {e:#}");
                Login::default()
            })
        } else {
            Login::default()
        };
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV)
            && !endpoint.is_empty()
        {
            login.endpoint = endpoint;
        }
        login
    }
}

impl LoginWriter for FileLoginStore {
    fn save_login(&self, login: &Login) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating directory {}", dir.display()))?;
        }
        let body = serde_json::to_vec(login).context("encoding login")?;
        std::fs::write(&self.path, body)
            .with_context(|| format!("writing {}", self.path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(LOGIN_FILE_MODE))
                .with_context(|| format!("setting permissions on {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// Load `barcelona.yml` from `dir`.
///
/// # Errors
///
/// Returns an error if the file is missing or not valid YAML.
pub fn load_heritage_config(dir: &Path) -> Result<HeritageConfig> {
    let path = dir.join(HERITAGE_CONFIG_FILE);
    let content =
        std::fs::read_to_string(&path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
}

/// Load `barcelona-review.yml` from `dir`.
///
/// # Errors
///
/// Returns an error if the file is missing or not valid YAML.
pub fn load_review_definition(dir: &Path) -> Result<ReviewDefinition> {
    let path = dir.join(REVIEW_CONFIG_FILE);
    let content =
        std::fs::read_to_string(&path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
}
