//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod env_vars;
pub mod error;
pub mod heritage;
pub mod nullable;
pub mod oneoff;
pub mod ssh;

pub use config::{AuthBackend, EnvironmentDef, HeritageConfig, Login, ReviewDefinition, User};
pub use env_vars::check_env_vars;
pub use error::{ApiError, ConfigError, RunError};
pub use heritage::{Heritage, ReviewApp, RunTarget, select_target};
pub use oneoff::{
    ContainerInstance, District, Oneoff, OneoffRequest, TaskStatus, find_container_instance,
};
