//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: HTTP, process execution,
//! filesystem access, timers, and on-disk configuration.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod api_client;
pub mod clock;
pub mod command_runner;
pub mod config;
pub mod fs;
