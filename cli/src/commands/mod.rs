//! Command implementations

pub mod api;
pub mod app;
pub mod login;
pub mod login_info;
pub mod run;
pub mod ssh;
