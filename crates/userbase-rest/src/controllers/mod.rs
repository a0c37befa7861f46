//! REST API controllers.

pub mod health_controller;
pub mod user_controller;

pub use health_controller::HealthStatus;
pub use user_controller::Verb;
