//! # Userbase Core
//!
//! Core types shared by every layer of Userbase: the `User` record and its
//! raw store representation, email address validation, and the unified
//! error taxonomy.

pub mod domain;
pub mod error;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use result::*;
pub use validation::*;
