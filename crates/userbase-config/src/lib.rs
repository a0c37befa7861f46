//! # Userbase Config
//!
//! Configuration management for Userbase.
//! Configuration is layered from files and environment variables and is
//! read once at startup.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
