//! User service implementation.

use crate::user_service::UserService;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use userbase_core::{is_valid_address, User, UserbaseError, UserbaseResult};
use userbase_repository::RecordStore;

/// User service over any record store.
///
/// The store is injected at construction; the service keeps no other state
/// and re-reads the store on every call.
pub struct UserServiceImpl<S: RecordStore + ?Sized = dyn RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore + ?Sized> UserServiceImpl<S> {
    /// Creates a new user service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns `true` if a record is stored under `email`.
    ///
    /// Backend failures propagate instead of reading as "absent". A stored
    /// item that does not decode still occupies the key.
    async fn exists(&self, email: &str) -> UserbaseResult<bool> {
        let Some(item) = self.store.get(email).await? else {
            return Ok(false);
        };

        match User::from_item(item) {
            Ok(existing) => Ok(!existing.is_empty()),
            Err(e) => {
                warn!("Undecodable record stored under {}: {}", email, e);
                Ok(true)
            }
        }
    }

    async fn write(&self, user: &User) -> UserbaseResult<()> {
        let item = user.to_item()?;
        self.store.put(item).await
    }
}

impl<S: RecordStore + ?Sized> Clone for UserServiceImpl<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore + ?Sized> fmt::Debug for UserServiceImpl<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}

#[async_trait]
impl<S: RecordStore + ?Sized + 'static> UserService for UserServiceImpl<S> {
    async fn fetch_one(&self, email: &str) -> UserbaseResult<User> {
        debug!("Fetching user: {}", email);

        if email.is_empty() {
            return Err(UserbaseError::invalid_input("email must not be empty"));
        }

        let item = self
            .store
            .get(email)
            .await
            .map_err(|e| UserbaseError::FetchFailed(e.to_string()))?;

        // Absence reads as the zero-valued user.
        let Some(item) = item else {
            return Ok(User::default());
        };

        User::from_item(item).map_err(|e| UserbaseError::FetchFailed(e.to_string()))
    }

    async fn fetch_all(&self) -> UserbaseResult<Vec<User>> {
        debug!("Fetching all users");

        let items = self
            .store
            .scan_all()
            .await
            .map_err(|e| UserbaseError::Scan(e.to_string()))?;

        let total = items.len();
        let users: Vec<User> = items
            .into_iter()
            .filter_map(|item| match User::from_item(item) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Skipping undecodable record: {}", e);
                    None
                }
            })
            .collect();

        debug!("Fetched {} of {} users", users.len(), total);
        Ok(users)
    }

    async fn create(&self, payload: &[u8]) -> UserbaseResult<User> {
        let user = User::from_payload(payload)?;
        debug!("Creating user: {}", user.email);

        if !is_valid_address(&user.email) {
            return Err(UserbaseError::InvalidEmail(user.email));
        }

        if self.exists(&user.email).await? {
            return Err(UserbaseError::EmailAlreadyExists(user.email));
        }

        self.write(&user).await?;

        info!("User created: {}", user.email);
        Ok(user)
    }

    async fn update(&self, payload: &[u8]) -> UserbaseResult<User> {
        let user = User::from_payload(payload)?;
        debug!("Updating user: {}", user.email);

        // Only stored records can be updated, and only valid addresses are
        // ever stored, so the address format needs no second check.
        if user.email.is_empty() || !self.exists(&user.email).await? {
            return Err(UserbaseError::EmailDoesNotExist(user.email));
        }

        self.write(&user).await?;

        info!("User updated: {}", user.email);
        Ok(user)
    }

    async fn delete(&self, email: &str) -> UserbaseResult<()> {
        debug!("Deleting user: {}", email);

        self.store
            .delete(email)
            .await
            .map_err(|e| UserbaseError::DeleteFailed(e.to_string()))?;

        info!("User deleted: {}", email);
        Ok(())
    }
}
