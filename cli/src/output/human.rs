//! Human-readable terminal renderer.

use std::io::{self, Write};

use owo_colors::OwoColorize as _;

use crate::domain::{Heritage, Login, Oneoff};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
///
/// Results are printed even under `--quiet`; only progress chatter is
/// suppressed.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render a one-off task, e.g. after a detached `bcn run`.
    pub fn render_oneoff(&self, oneoff: &Oneoff) {
        to_stdout(|w| self.write_oneoff(w, oneoff));
    }

    /// Render a heritage with its environment and scheduled tasks.
    pub fn render_heritage(&self, heritage: &Heritage) {
        to_stdout(|w| self.write_heritage(w, heritage));
    }

    /// Render the stored login. The token itself is never shown.
    pub fn render_login(&self, login: &Login) {
        to_stdout(|w| self.write_login(w, login));
    }

    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_oneoff(&self, w: &mut impl Write, oneoff: &Oneoff) -> io::Result<()> {
        self.header(w, &format!("Oneoff #{}", oneoff.id))?;
        for (key, value) in oneoff_rows(oneoff) {
            self.kv(w, key, &value)?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_heritage(&self, w: &mut impl Write, heritage: &Heritage) -> io::Result<()> {
        self.header(w, &format!("Heritage {}", heritage.name))?;
        for (key, value) in heritage_rows(heritage) {
            self.kv(w, key, &value)?;
        }
        if !heritage.env_vars.is_empty() {
            self.header(w, "Environment:")?;
            for (name, value) in &heritage.env_vars {
                self.kv(w, &format!("{name}="), value)?;
            }
        }
        if !heritage.scheduled_tasks.is_empty() {
            self.header(w, "Scheduled tasks:")?;
            for task in &heritage.scheduled_tasks {
                self.kv(w, &task.schedule, &task.command)?;
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_login(&self, w: &mut impl Write, login: &Login) -> io::Result<()> {
        self.kv(w, "Endpoint:", or_dash(&login.endpoint))?;
        self.kv(w, "Auth:    ", or_dash(&login.auth))?;
        let token = if login.token.is_empty() { "not set" } else { "set" };
        self.kv(w, "Token:   ", token)
    }

    fn header(&self, w: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(w, "{}", msg.style(self.ctx.styles.header))
    }

    fn kv(&self, w: &mut impl Write, key: &str, value: &str) -> io::Result<()> {
        writeln!(w, "  {}  {value}", key.style(self.ctx.styles.dim))
    }
}

fn to_stdout(render: impl FnOnce(&mut io::StdoutLock<'static>) -> io::Result<()>) {
    if let Err(e) = render(&mut io::stdout().lock()) {
        tracing::debug!("writing to stdout failed: {e}");
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// Key/value rows shown for a one-off.
#[must_use]
pub fn oneoff_rows(oneoff: &Oneoff) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Command:  ", oneoff.command.clone()),
        ("Status:   ", oneoff.status.to_string()),
    ];
    if let Some(arn) = &oneoff.task_arn {
        rows.push(("Task ARN: ", arn.clone()));
    }
    if let Some(code) = format_exit_code(oneoff.exit_code.as_ref()) {
        rows.push(("Exit code:", code));
    }
    if let Some(reason) = oneoff.reason.as_deref().filter(|r| !r.is_empty()) {
        rows.push(("Reason:   ", reason.to_owned()));
    }
    if let Some(memory) = oneoff.memory {
        rows.push(("Memory:   ", format!("{memory} MB")));
    }
    if !oneoff.interactive_run_command.is_empty() {
        rows.push(("Attach:   ", oneoff.interactive_run_command.clone()));
    }
    rows
}

/// Key/value rows shown for a heritage.
#[must_use]
pub fn heritage_rows(heritage: &Heritage) -> Vec<(&'static str, String)> {
    let image = match &heritage.image_tag {
        Some(tag) if !tag.is_empty() => format!("{}:{tag}", heritage.image_name),
        _ => heritage.image_name.clone(),
    };
    let mut rows = vec![("Image:        ", image)];
    if let Some(version) = heritage.version {
        rows.push(("Version:      ", version.to_string()));
    }
    if let Some(cmd) = heritage.before_deploy.as_deref().filter(|c| !c.is_empty()) {
        rows.push(("Before deploy:", cmd.to_owned()));
    }
    rows
}

/// Exit codes arrive as numbers or strings depending on the task backend.
#[must_use]
pub fn format_exit_code(code: Option<&serde_json::Value>) -> Option<String> {
    match code? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
