//! # Userbase REST
//!
//! HTTP binding for the user service using Axum. A single dispatch handler
//! maps the request method onto a service operation and renders the result
//! or error as JSON.

pub mod controllers;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
