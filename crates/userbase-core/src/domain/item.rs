//! Raw store items.

use serde_json::{Map, Value};

/// Attribute name of the primary key in every stored item.
pub const PRIMARY_KEY: &str = "email";

/// A record as the store holds it: a flat map of attribute name to value.
pub type Item = Map<String, Value>;

/// Returns the primary key of an item, if it carries a string `email`.
#[must_use]
pub fn item_key(item: &Item) -> Option<&str> {
    item.get(PRIMARY_KEY).and_then(Value::as_str)
}
