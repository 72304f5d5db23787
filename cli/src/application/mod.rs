//! Application layer: port trait definitions, the operation protocol, and
//! use-case orchestration.
//!
//! This module depends only on `crate::domain`: never on `crate::infra`,
//! `crate::commands`, or `crate::output`.

pub mod operation;
pub mod ports;
pub mod services;

pub use operation::{Operation, OperationFailed, Outcome, execute};
pub use ports::{
    ApiDelete, ApiGet, ApiPost, ApiRequester, Authenticator, CommandRunner, Confirmer, LocalFs,
    LoginStore, LoginWriter, Method, Presenter, ProgressReporter, Prompter, Sleeper, SshConfig,
};
