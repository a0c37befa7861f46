//! User record.

use crate::{Item, UserbaseError, UserbaseResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The sole stored entity. `email` is also the store's primary key.
///
/// Missing fields decode to empty strings, so an empty item decodes to the
/// zero-valued user rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// Email address; unique across all stored records.
    #[serde(default)]
    pub email: String,
    /// First name.
    #[serde(default, alias = "firstname")]
    pub first_name: String,
    /// Last name.
    #[serde(default, alias = "lastname")]
    pub last_name: String,
}

impl User {
    /// Creates a new user record.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Decodes a request payload into a user.
    pub fn from_payload(payload: &[u8]) -> UserbaseResult<Self> {
        serde_json::from_slice(payload).map_err(|e| UserbaseError::InvalidUserData(e.to_string()))
    }

    /// Decodes a raw store item into a user.
    pub fn from_item(item: Item) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(item))
    }

    /// Encodes the user as a raw store item.
    pub fn to_item(&self) -> UserbaseResult<Item> {
        match serde_json::to_value(self)? {
            Value::Object(item) => Ok(item),
            other => Err(UserbaseError::encoding(format!(
                "expected an object, got {other}"
            ))),
        }
    }

    /// Returns `true` for the zero-valued record, i.e. one with no email.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_empty()
    }
}
