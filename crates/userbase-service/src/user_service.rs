//! User service trait definition.

use async_trait::async_trait;
use userbase_core::{User, UserbaseResult};

/// User service trait.
///
/// Create and update take the raw request payload so that decoding failures
/// are reported by the service as `InvalidUserData`.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Gets the user stored under `email`.
    ///
    /// An empty `email` is `InvalidInput`. An absent record yields the
    /// zero-valued user (see [`User::is_empty`]).
    async fn fetch_one(&self, email: &str) -> UserbaseResult<User>;

    /// Lists every stored user, in no particular order.
    async fn fetch_all(&self) -> UserbaseResult<Vec<User>>;

    /// Creates a user from a JSON payload. The email must be valid and unused.
    async fn create(&self, payload: &[u8]) -> UserbaseResult<User>;

    /// Overwrites an existing user from a JSON payload.
    async fn update(&self, payload: &[u8]) -> UserbaseResult<User>;

    /// Deletes the user stored under `email`. Missing users are not an error.
    async fn delete(&self, email: &str) -> UserbaseResult<()>;
}
