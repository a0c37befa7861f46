//! Domain layer: the user record and its raw store representation.

pub mod item;
pub mod user;

pub use item::*;
pub use user::*;
