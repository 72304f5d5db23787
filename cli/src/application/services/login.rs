//! `bcn login`: trade a GitHub token for API credentials, store them, and
//! make sure an SSH key pair exists and is registered.

use anyhow::{Context, Result};

use crate::application::operation::{Operation, Outcome};
use crate::application::ports::{
    Authenticator, CommandRunner, LocalFs, LoginWriter, ProgressReporter, Prompter, SshConfig,
};
use crate::domain::ssh::{keygen_args, trim_public_key};
use crate::domain::{AuthBackend, Login, User};

const TOKEN_HINT: &str = "Create new GitHub access token with read:org permission here https://github.com/settings/tokens/new";

/// The local SSH key pair `bcn login` sets up.
#[allow(async_fn_in_trait)]
pub trait KeyPair {
    /// Whether the public key is already on disk.
    fn exists(&self) -> bool;
    /// Create a fresh key pair.
    async fn generate(&self) -> Result<()>;
    /// Public key text, ready to upload.
    fn public_key(&self) -> Result<String>;
}

/// `KeyPair` under the configured key paths, created with `ssh-keygen`.
pub struct LocalKeyPair<'a, C, F, R> {
    config: &'a C,
    fs: &'a F,
    runner: &'a R,
}

impl<'a, C: SshConfig, F: LocalFs, R: CommandRunner> LocalKeyPair<'a, C, F, R> {
    #[must_use]
    pub fn new(config: &'a C, fs: &'a F, runner: &'a R) -> Self {
        Self { config, fs, runner }
    }
}

impl<C: SshConfig, F: LocalFs, R: CommandRunner> KeyPair for LocalKeyPair<'_, C, F, R> {
    fn exists(&self) -> bool {
        self.fs.exists(&self.config.public_key_path())
    }

    async fn generate(&self) -> Result<()> {
        let args = keygen_args(&self.config.private_key_path());
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        let status = self.runner.run_status("ssh-keygen", &argv).await?;
        anyhow::ensure!(status.success(), "ssh-keygen exited with {status}");
        Ok(())
    }

    fn public_key(&self) -> Result<String> {
        let path = self.config.public_key_path();
        let raw = self
            .fs
            .read(&path)
            .with_context(|| format!("reading public key {}", path.display()))?;
        Ok(trim_public_key(&String::from_utf8_lossy(&raw)).to_string())
    }
}

/// Values given on the command line. Empty strings are asked for.
#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
    pub endpoint: String,
    pub backend: String,
    pub github_token: String,
    pub vault_url: String,
}

pub struct LoginOperation<'a, A, W, K, Q, P> {
    auth: &'a A,
    store: &'a W,
    keys: &'a K,
    prompt: &'a Q,
    out: &'a P,
    request: LoginRequest,
}

impl<'a, A, W, K, Q, P> LoginOperation<'a, A, W, K, Q, P>
where
    A: Authenticator,
    W: LoginWriter,
    K: KeyPair,
    Q: Prompter,
    P: ProgressReporter,
{
    #[must_use]
    pub fn new(
        auth: &'a A,
        store: &'a W,
        keys: &'a K,
        prompt: &'a Q,
        out: &'a P,
        request: LoginRequest,
    ) -> Self {
        Self {
            auth,
            store,
            keys,
            prompt,
            out,
            request,
        }
    }

    fn github_token(&self) -> Result<String> {
        if !self.request.github_token.is_empty() {
            return Ok(self.request.github_token.clone());
        }
        self.out.step(TOKEN_HINT);
        let token = self.prompt.ask("GitHub Token", true)?;
        anyhow::ensure!(!token.is_empty(), "token is required");
        Ok(token)
    }

    fn vault_url(&self) -> Result<String> {
        if !self.request.vault_url.is_empty() {
            return Ok(self.request.vault_url.clone());
        }
        self.out
            .step("URL of vault server (e.g. https://vault.example.com)");
        let url = self.prompt.ask("Vault server URL", false)?;
        anyhow::ensure!(!url.is_empty(), "vault url is required");
        Ok(url)
    }

    async fn authenticate(&self, backend: AuthBackend) -> Result<User> {
        match backend {
            AuthBackend::Github => {
                self.out.step("Logging in with Github");
                let token = self.github_token()?;
                self.auth
                    .login_with_github(&self.request.endpoint, &token)
                    .await
            }
            AuthBackend::Vault => {
                self.out.step("Logging in with Vault");
                let token = self.github_token()?;
                let url = self.vault_url()?;
                let client_token = self.auth.login_with_vault(&url, &token).await?;
                Ok(User {
                    token: client_token,
                    ..User::default()
                })
            }
        }
    }

    async fn login(&self, backend: AuthBackend) -> Result<Outcome> {
        let user = self.authenticate(backend).await?;
        let login = Login {
            auth: backend.as_str().to_string(),
            token: user.token.clone(),
            endpoint: self.request.endpoint.clone(),
            ..Login::default()
        };
        self.store.save_login(&login)?;
        tracing::info!(endpoint = %login.endpoint, auth = %login.auth, "login saved");

        let key_exists = self.keys.exists();
        if !key_exists {
            self.out.step("Generating your SSH key pair...");
            self.keys.generate().await?;
        }
        if !key_exists || user.public_key.is_empty() {
            self.out.step("Registering your public key...");
            let key = self.keys.public_key()?;
            self.auth.register_public_key(&login, &key).await?;
        }

        self.out
            .success(&format!("Logged in to {}", login.endpoint));
        Ok(Outcome::Ok)
    }
}

impl<A, W, K, Q, P> Operation for LoginOperation<'_, A, W, K, Q, P>
where
    A: Authenticator,
    W: LoginWriter,
    K: KeyPair,
    Q: Prompter,
    P: ProgressReporter,
{
    async fn run(&self) -> Outcome {
        if self.request.endpoint.is_empty() {
            return Outcome::error("endpoint is required");
        }
        match AuthBackend::parse(&self.request.backend) {
            Ok(backend) => self.login(backend).await.into(),
            Err(e) => Outcome::error(e.to_string()),
        }
    }
}
