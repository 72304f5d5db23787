//! Shared fakes for unit tests.
//!
//! Every port gets a small in-memory implementation that records how it was
//! called, so each test can assert on the exact traffic an operation produced.

#![allow(clippy::expect_used, dead_code)]

use std::collections::{HashMap, VecDeque};
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use barcelona_cli::application::services::login::KeyPair;
use barcelona_cli::application::services::ssh_session::{SessionOpener, SshTarget};
use barcelona_cli::application::{
    ApiDelete, ApiGet, ApiPost, ApiRequester, Authenticator, CommandRunner, Confirmer, LocalFs,
    LoginStore, LoginWriter, Method, Presenter, ProgressReporter, Prompter, Sleeper, SshConfig,
};
use barcelona_cli::domain::{Heritage, Login, Oneoff, User};
use serde_json::{Value, json};

// ── Fixtures ──────────────────────────────────────────────────────────────────

pub const CERT: &str = "ecdsa-sha2-nistp256-cert-v01@openssh.com AAAAtest";
pub const ARN: &str = "arn:aws:ecs:ap-northeast-1:123:container-instance/abc";
pub const IP: &str = "10.0.0.5";
pub const BASTION: &str = "1.2.3.4";

pub fn district() -> Value {
    json!({
        "name": "default",
        "bastion_ip": BASTION,
        "container_instances": [
            {"container_instance_arn": "arn:other", "private_ip_address": "10.0.0.9"},
            {"container_instance_arn": ARN, "private_ip_address": IP}
        ]
    })
}

/// A one-off payload as returned by submit and status calls.
pub fn oneoff(status: &str) -> Value {
    json!({
        "id": 42,
        "task_arn": "arn:aws:ecs:task/xyz",
        "command": "rails console",
        "status": status,
        "interactive_run_command": "docker exec -it web rails console",
        "container_instance_arn": ARN,
        "district": district()
    })
}

pub fn launch_response(status: &str) -> Value {
    json!({"oneoff": oneoff(status), "certificate": CERT})
}

pub fn status_response(status: &str) -> Value {
    json!({"oneoff": oneoff(status)})
}

// ── API ───────────────────────────────────────────────────────────────────────

/// One recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Vec<u8>>,
}

impl ApiCall {
    pub fn body_json(&self) -> Value {
        serde_json::from_slice(self.body.as_deref().expect("body")).expect("json body")
    }
}

/// Replays scripted responses in order and records every request.
#[derive(Default)]
pub struct ScriptedApi {
    responses: Mutex<VecDeque<Result<Vec<u8>, String>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, value: Value) -> Self {
        self.responses
            .lock()
            .expect("lock")
            .push_back(Ok(value.to_string().into_bytes()));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .expect("lock")
            .push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.path).collect()
    }
}

impl ApiRequester for ScriptedApi {
    async fn request(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        self.calls.lock().expect("lock").push(ApiCall {
            method,
            path: path.to_string(),
            body,
        });
        match self.responses.lock().expect("lock").pop_front() {
            Some(Ok(bytes)) => Ok(bytes),
            Some(Err(message)) => anyhow::bail!(message),
            None => anyhow::bail!("no scripted response for {method} {path}"),
        }
    }
}

impl ApiGet for ScriptedApi {
    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        self.request(Method::Get, path, None).await
    }
}

impl ApiPost for ScriptedApi {
    async fn post(&self, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        self.request(Method::Post, path, body).await
    }
}

impl ApiDelete for ScriptedApi {
    async fn delete(&self, path: &str) -> Result<Vec<u8>> {
        self.request(Method::Delete, path, None).await
    }
}

// ── Process / time / filesystem ───────────────────────────────────────────────

/// Records invocations and exits with a fixed code.
pub struct RecordingRunner {
    code: i32,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl RecordingRunner {
    pub fn exiting(code: i32) -> Self {
        Self {
            code,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().expect("lock").clone()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        self.calls.lock().expect("lock").push((
            program.to_string(),
            args.iter().map(ToString::to_string).collect(),
        ));
        Ok(ExitStatus::from_raw(self.code << 8))
    }
}

#[derive(Default)]
pub struct CountingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl CountingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().expect("lock").clone()
    }
}

impl Sleeper for CountingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().expect("lock").push(duration);
    }
}

#[derive(Default)]
pub struct MemFs {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemFs {
    pub fn with_file(path: &Path, content: &[u8]) -> Self {
        let fs = Self::default();
        fs.files
            .lock()
            .expect("lock")
            .insert(path.to_path_buf(), content.to_vec());
        fs
    }

    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().expect("lock").get(path).cloned()
    }
}

impl LocalFs for MemFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().expect("lock").contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.contents(path)
            .ok_or_else(|| anyhow::anyhow!("no such file: {}", path.display()))
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        self.files
            .lock()
            .expect("lock")
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }
}

pub struct StubSshConfig {
    pub root: PathBuf,
    pub debug: bool,
}

impl StubSshConfig {
    pub fn at(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            debug: false,
        }
    }
}

impl SshConfig for StubSshConfig {
    fn cert_path(&self) -> PathBuf {
        self.root.join("id_ecdsa-cert.pub")
    }

    fn private_key_path(&self) -> PathBuf {
        self.root.join("id_ecdsa")
    }

    fn public_key_path(&self) -> PathBuf {
        self.root.join("id_ecdsa.pub")
    }

    fn is_debug(&self) -> bool {
        self.debug
    }
}

// ── SSH ───────────────────────────────────────────────────────────────────────

/// One recorded session request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub ip: String,
    pub bastion_ip: String,
    pub certificate: String,
    pub command: String,
}

#[derive(Default)]
pub struct RecordingOpener {
    sessions: Mutex<Vec<Session>>,
}

impl RecordingOpener {
    pub fn sessions(&self) -> Vec<Session> {
        self.sessions.lock().expect("lock").clone()
    }
}

impl SessionOpener for RecordingOpener {
    async fn open(&self, target: &SshTarget<'_>, command: &str) -> Result<()> {
        self.sessions.lock().expect("lock").push(Session {
            ip: target.ip.to_string(),
            bastion_ip: target.bastion_ip.to_string(),
            certificate: target.certificate.to_string(),
            command: command.to_string(),
        });
        Ok(())
    }
}

// ── Output / interaction ──────────────────────────────────────────────────────

/// Records reporter and presenter events as `kind:detail` strings.
#[derive(Default)]
pub struct RecordingOutput {
    events: Mutex<Vec<String>>,
}

impl RecordingOutput {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("lock").clone()
    }

    fn push(&self, kind: &str, detail: impl std::fmt::Display) {
        self.events
            .lock()
            .expect("lock")
            .push(format!("{kind}:{detail}"));
    }
}

impl ProgressReporter for RecordingOutput {
    fn step(&self, message: &str) {
        self.push("step", message);
    }

    fn success(&self, message: &str) {
        self.push("success", message);
    }

    fn warn(&self, message: &str) {
        self.push("warn", message);
    }

    fn debug(&self, message: &str) {
        self.push("debug", message);
    }
}

impl Presenter for RecordingOutput {
    fn oneoff(&self, oneoff: &Oneoff) {
        self.push("oneoff", oneoff.id);
    }

    fn heritage(&self, heritage: &Heritage) {
        self.push("heritage", &heritage.name);
    }

    fn json(&self, body: &[u8]) {
        self.push("json", String::from_utf8_lossy(body));
    }

    fn login(&self, login: &Login) {
        self.push("login", &login.endpoint);
    }
}

/// Answers every prompt with a fixed value and counts prompts.
pub struct FixedConfirmer {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl FixedConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("lock").clone()
    }
}

impl Confirmer for FixedConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.prompts.lock().expect("lock").push(prompt.to_string());
        Ok(self.answer)
    }
}

pub struct FixedLogin(pub Login);

impl LoginStore for FixedLogin {
    fn load_login(&self) -> Login {
        self.0.clone()
    }
}

// ── Login ─────────────────────────────────────────────────────────────────────

/// One recorded token exchange or key upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCall {
    Github { endpoint: String, token: String },
    Vault { url: String, token: String },
    RegisterKey { login: Login, public_key: String },
}

/// Answers token exchanges with a fixed user and records every call.
pub struct ScriptedAuth {
    user: User,
    failure: Option<String>,
    calls: Mutex<Vec<AuthCall>>,
}

impl ScriptedAuth {
    pub fn returning(user: User) -> Self {
        Self {
            user,
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::returning(User::default())
        }
    }

    pub fn calls(&self) -> Vec<AuthCall> {
        self.calls.lock().expect("lock").clone()
    }

    fn record(&self, call: AuthCall) -> Result<()> {
        self.calls.lock().expect("lock").push(call);
        match &self.failure {
            Some(message) => anyhow::bail!(message.clone()),
            None => Ok(()),
        }
    }
}

impl Authenticator for ScriptedAuth {
    async fn login_with_github(&self, endpoint: &str, github_token: &str) -> Result<User> {
        self.record(AuthCall::Github {
            endpoint: endpoint.to_string(),
            token: github_token.to_string(),
        })?;
        Ok(self.user.clone())
    }

    async fn login_with_vault(&self, vault_url: &str, github_token: &str) -> Result<String> {
        self.record(AuthCall::Vault {
            url: vault_url.to_string(),
            token: github_token.to_string(),
        })?;
        Ok(self.user.token.clone())
    }

    async fn register_public_key(&self, login: &Login, public_key: &str) -> Result<()> {
        self.record(AuthCall::RegisterKey {
            login: login.clone(),
            public_key: public_key.to_string(),
        })
    }
}

#[derive(Default)]
pub struct MemLoginWriter {
    saved: Mutex<Vec<Login>>,
}

impl MemLoginWriter {
    pub fn saved(&self) -> Vec<Login> {
        self.saved.lock().expect("lock").clone()
    }
}

impl LoginWriter for MemLoginWriter {
    fn save_login(&self, login: &Login) -> Result<()> {
        self.saved.lock().expect("lock").push(login.clone());
        Ok(())
    }
}

/// Replies to prompts in order and records what was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<(String, bool)>>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(ToString::to_string).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<(String, bool)> {
        self.asked.lock().expect("lock").clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, prompt: &str, secret: bool) -> Result<String> {
        self.asked
            .lock()
            .expect("lock")
            .push((prompt.to_string(), secret));
        Ok(self
            .answers
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_default())
    }
}

/// Key pair that either exists already or appears when generated.
pub struct FakeKeyPair {
    exists: bool,
    public_key: String,
    generated: Mutex<u32>,
}

impl FakeKeyPair {
    pub fn present(public_key: &str) -> Self {
        Self {
            exists: true,
            public_key: public_key.to_string(),
            generated: Mutex::new(0),
        }
    }

    pub fn absent(public_key: &str) -> Self {
        Self {
            exists: false,
            ..Self::present(public_key)
        }
    }

    pub fn generated(&self) -> u32 {
        *self.generated.lock().expect("lock")
    }
}

impl KeyPair for FakeKeyPair {
    fn exists(&self) -> bool {
        self.exists
    }

    async fn generate(&self) -> Result<()> {
        *self.generated.lock().expect("lock") += 1;
        Ok(())
    }

    fn public_key(&self) -> Result<String> {
        Ok(self.public_key.clone())
    }
}
