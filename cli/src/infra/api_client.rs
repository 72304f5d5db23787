//! HTTP client for the Barcelona REST API.
//!
//! Implements the `ApiRequester`/`ApiGet`/`ApiPost`/`ApiDelete` ports and
//! the `Authenticator` used by `bcn login`. One client is built at start-up
//! and handed to every operation.

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use regex::Regex;
use reqwest::RequestBuilder;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};

use crate::application::ports::{ApiDelete, ApiGet, ApiPost, ApiRequester, Authenticator, Method};
use crate::domain::config::{
    API_PATH_PREFIX, Login, User, UserResponse, VaultAuthResponse, auth_header,
};
use crate::domain::error::ApiError;

/// Blanket timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(Token): (\S+)").expect("valid regex")
});

/// Replace token header values in a traffic dump with `[filtered]`.
#[must_use]
pub fn redact_tokens(dump: &str) -> String {
    TOKEN_RE.replace_all(dump, "$1: [filtered]").into_owned()
}

pub struct BarcelonaClient {
    http: reqwest::Client,
    login: Login,
    debug: bool,
}

impl BarcelonaClient {
    /// Build a client for `login.endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(login: Login, debug: bool) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building HTTP client")?;
        Ok(Self { http, login, debug })
    }

    /// Full URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        api_url(&self.login.endpoint, path)
    }

    fn builder(&self, method: reqwest::Method, url: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if self.debug {
            builder.query(&[("debug", "true")])
        } else {
            builder
        }
    }

    /// API call authenticated as `login`.
    async fn call(
        &self,
        login: &Login,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let mut builder = self.builder(to_reqwest(method), &api_url(&login.endpoint, path));
        if let Some((name, value)) = auth_header(login) {
            builder = builder.header(name, value);
        }
        self.send(builder, body.unwrap_or_default()).await
    }

    async fn send(&self, builder: RequestBuilder, body: Vec<u8>) -> Result<Vec<u8>> {
        let request = builder
            .body(body.clone())
            .build()
            .context("building request")?;
        let method = request.method().clone();
        let url = request.url().to_string();

        self.dump(&format!("{method} {url}"), request.headers(), &body);
        tracing::debug!(%method, %url, "api request");

        let response = self
            .http
            .execute(request)
            .await
            .with_context(|| format!("{method} {url}"))?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("reading response from {url}"))?
            .to_vec();
        self.dump(&format!("HTTP {status}"), &headers, &bytes);

        if !status.is_success() {
            let Some(err) = serde_json::from_slice::<ApiError>(&bytes)
                .ok()
                .filter(|e| !e.message.is_empty())
            else {
                anyhow::bail!(
                    "Failed to parse error (HTTP {status}). Use `bcn -d` to see raw server response"
                );
            };
            return Err(err.verbose(self.debug).into());
        }
        Ok(bytes)
    }

    fn dump(&self, head: &str, headers: &HeaderMap, body: &[u8]) {
        if !self.debug {
            return;
        }
        let mut text = format!("{head}\n");
        for (name, value) in headers {
            text.push_str(&format!(
                "{}: {}\n",
                header_case(name.as_str()),
                value.to_str().unwrap_or("<binary>")
            ));
        }
        text.push('\n');
        text.push_str(&String::from_utf8_lossy(body));
        eprintln!("{}", redact_tokens(&text));
    }
}

/// `<endpoint>/v1<path>`.
fn api_url(endpoint: &str, path: &str) -> String {
    format!("{}{API_PATH_PREFIX}{path}", endpoint.trim_end_matches('/'))
}

/// Vault's GitHub auth endpoint on the server at `vault_url`.
fn vault_login_url(vault_url: &str) -> String {
    format!("{}/v1/auth/github/login", vault_url.trim_end_matches('/'))
}

/// `x-barcelona-token` → `X-Barcelona-Token`, as the header was written.
fn header_case(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl ApiRequester for BarcelonaClient {
    async fn request(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        self.call(&self.login, method, path, body).await
    }
}

impl Authenticator for BarcelonaClient {
    async fn login_with_github(&self, endpoint: &str, github_token: &str) -> Result<User> {
        let url = api_url(endpoint, "/login");
        let builder = self
            .builder(reqwest::Method::POST, &url)
            .header("X-GitHub-Token", github_token);
        let bytes = self.send(builder, Vec::new()).await?;
        let resp: UserResponse =
            serde_json::from_slice(&bytes).context("decoding login response")?;
        resp.user.context("login response did not include a user")
    }

    async fn login_with_vault(&self, vault_url: &str, github_token: &str) -> Result<String> {
        let url = vault_login_url(vault_url);
        let body = serde_json::to_vec(&serde_json::json!({ "token": github_token }))?;
        let bytes = self
            .send(self.builder(reqwest::Method::POST, &url), body)
            .await?;
        let resp: VaultAuthResponse =
            serde_json::from_slice(&bytes).context("decoding Vault login response")?;
        anyhow::ensure!(
            !resp.auth.client_token.is_empty(),
            "Vault login response did not include a client token"
        );
        Ok(resp.auth.client_token)
    }

    async fn register_public_key(&self, login: &Login, public_key: &str) -> Result<()> {
        let body = serde_json::to_vec(&serde_json::json!({ "public_key": public_key }))?;
        self.call(login, Method::Patch, "/user", Some(body)).await?;
        Ok(())
    }
}

impl ApiGet for BarcelonaClient {
    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        self.request(Method::Get, path, None).await
    }
}

impl ApiPost for BarcelonaClient {
    async fn post(&self, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        self.request(Method::Post, path, body).await
    }
}

impl ApiDelete for BarcelonaClient {
    async fn delete(&self, path: &str) -> Result<Vec<u8>> {
        self.request(Method::Delete, path, None).await
    }
}
