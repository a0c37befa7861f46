//! # Userbase Service
//!
//! Business logic for the user record: uniqueness on create, existence on
//! update, and the mapping of each operation onto record store primitives.

mod r#impl;
pub mod user_service;

pub use r#impl::UserServiceImpl;
pub use user_service::*;
