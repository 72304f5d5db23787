//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`
//! and `Presenter`.
//!
//! Wraps `&OutputContext` so application services can emit progress events
//! and results without depending on any presentation type directly.

use crate::application::ports::{Presenter, ProgressReporter};
use crate::domain::{Heritage, Login, Oneoff};
use crate::output::OutputContext;
use crate::output::human::HumanRenderer;
use crate::output::json::pretty_json;

/// Terminal reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ⚠ {message}"` (suppressed when `ctx.quiet`)
/// - `debug()` prints to stderr, always
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.ctx.step(message);
    }

    fn success(&self, message: &str) {
        self.ctx.success(message);
    }

    fn warn(&self, message: &str) {
        self.ctx.warn(message);
    }

    fn debug(&self, message: &str) {
        self.ctx.debug(message);
    }
}

impl Presenter for TerminalReporter<'_> {
    fn oneoff(&self, oneoff: &Oneoff) {
        HumanRenderer::new(self.ctx).render_oneoff(oneoff);
    }

    fn heritage(&self, heritage: &Heritage) {
        HumanRenderer::new(self.ctx).render_heritage(heritage);
    }

    // Not suppressed by quiet.
    fn json(&self, body: &[u8]) {
        println!("{}", pretty_json(body));
    }

    fn login(&self, login: &Login) {
        HumanRenderer::new(self.ctx).render_login(login);
    }
}
