//! # Userbase Server Library
//!
//! Wires configuration, the record store backend, the user service and the
//! HTTP router into a runnable application.

pub mod app;
pub mod startup;
