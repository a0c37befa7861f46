//! Redis-backed record store.
//!
//! Each record is a Redis hash stored at `{prefix}:{table}:{email}` whose
//! fields are the item's attributes.

use crate::traits::RecordStore;
use async_trait::async_trait;
use deadpool_redis::{
    redis::{self, AsyncCommands},
    Config, Connection, Pool, Runtime,
};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};
use userbase_config::StoreConfig;
use userbase_core::{item_key, Item, UserbaseError, UserbaseResult, PRIMARY_KEY};

/// Keys requested per `SCAN` round trip.
const SCAN_BATCH: usize = 500;

/// Create a Redis connection pool and verify it with a `PING`.
pub async fn create_pool(config: &StoreConfig) -> UserbaseResult<Pool> {
    info!("Creating Redis connection pool for record store...");

    let pool = Config::from_url(&config.redis_url)
        .builder()
        .map_err(|e| UserbaseError::Configuration(format!("Invalid Redis config: {e}")))?
        .max_size(config.pool_size)
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| UserbaseError::Configuration(format!("Failed to create pool: {e}")))?;

    // Test connection
    let mut conn = pool
        .get()
        .await
        .map_err(|e| UserbaseError::Configuration(format!("Failed to connect to Redis: {e}")))?;
    let _: String = redis::cmd("PING")
        .query_async(&mut *conn)
        .await
        .map_err(|e| UserbaseError::Configuration(format!("Redis PING failed: {e}")))?;

    info!("Redis connection pool created successfully");

    Ok(pool)
}

/// Redis key builder for user records.
#[derive(Debug, Clone)]
pub struct RedisKeys {
    namespace: String,
}

impl RedisKeys {
    /// Create a key builder for `table` under `prefix`.
    pub fn new(prefix: &str, table: &str) -> Self {
        Self {
            namespace: format!("{prefix}:{table}"),
        }
    }

    /// Hash key holding the record for `email`.
    #[must_use]
    pub fn record(&self, email: &str) -> String {
        format!("{}:{}", self.namespace, email)
    }

    /// `SCAN MATCH` pattern covering every record of the table.
    #[must_use]
    pub fn pattern(&self) -> String {
        format!("{}:*", escape_glob(&self.namespace))
    }
}

fn escape_glob(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Record store over Redis hashes.
#[derive(Clone)]
pub struct RedisRecordStore {
    pool: Pool,
    keys: RedisKeys,
}

impl RedisRecordStore {
    /// Create a store using an existing pool.
    #[must_use]
    pub fn new(pool: Pool, keys: RedisKeys) -> Self {
        Self { pool, keys }
    }

    /// Create a store from configuration, connecting a fresh pool.
    pub async fn connect(config: &StoreConfig) -> UserbaseResult<Self> {
        let pool = create_pool(config).await?;
        Ok(Self::new(
            pool,
            RedisKeys::new(&config.key_prefix, &config.table_name),
        ))
    }

    async fn conn(&self) -> UserbaseResult<Connection> {
        self.pool.get().await.map_err(|e| {
            UserbaseError::store_unavailable(format!("Failed to get Redis connection: {e}"))
        })
    }
}

impl std::fmt::Debug for RedisRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRecordStore")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

/// Converts hash fields into an item. Every value is a string.
fn fields_to_item(fields: HashMap<String, String>) -> Item {
    fields
        .into_iter()
        .map(|(name, value)| (name, Value::String(value)))
        .collect()
}

/// Converts an item into hash fields. Hashes only hold strings.
fn item_to_fields(item: &Item) -> UserbaseResult<Vec<(String, String)>> {
    item.iter()
        .map(|(name, value)| match value {
            Value::String(s) => Ok((name.clone(), s.clone())),
            other => Err(UserbaseError::encoding(format!(
                "attribute '{name}' must be a string, got {other}"
            ))),
        })
        .collect()
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    async fn get(&self, key: &str) -> UserbaseResult<Option<Item>> {
        let redis_key = self.keys.record(key);
        let mut conn = self.conn().await?;

        let fields: HashMap<String, String> = conn.hgetall(&redis_key).await.map_err(|e| {
            UserbaseError::store_unavailable(format!("Failed to get key '{redis_key}': {e}"))
        })?;

        if fields.is_empty() {
            debug!("Redis store: miss for '{}'", redis_key);
            return Ok(None);
        }

        Ok(Some(fields_to_item(fields)))
    }

    async fn scan_all(&self) -> UserbaseResult<Vec<Item>> {
        let pattern = self.keys.pattern();
        let mut conn = self.conn().await?;

        // SCAN may return a key more than once.
        let mut keys = BTreeSet::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut *conn)
                .await
                .map_err(|e| {
                    UserbaseError::store_unavailable(format!("Failed to scan keys: {e}"))
                })?;

            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        for key in &keys {
            pipe.hgetall(key);
        }
        let replies: Vec<HashMap<String, String>> =
            pipe.query_async(&mut *conn).await.map_err(|e| {
                UserbaseError::store_unavailable(format!("Failed to read scanned keys: {e}"))
            })?;

        debug!("Redis store: scanned {} keys matching '{}'", keys.len(), pattern);

        // Keys deleted between SCAN and HGETALL come back empty.
        Ok(replies
            .into_iter()
            .filter(|fields| !fields.is_empty())
            .map(fields_to_item)
            .collect())
    }

    async fn put(&self, item: Item) -> UserbaseResult<()> {
        let key = item_key(&item).ok_or_else(|| {
            UserbaseError::encoding(format!("item has no string '{PRIMARY_KEY}' attribute"))
        })?;
        let redis_key = self.keys.record(key);
        let fields = item_to_fields(&item)?;

        let mut conn = self.conn().await?;

        // Replace the whole hash so no stale attribute survives an overwrite.
        let _: () = redis::pipe()
            .atomic()
            .del(&redis_key)
            .ignore()
            .hset_multiple(&redis_key, fields.as_slice())
            .ignore()
            .query_async(&mut *conn)
            .await
            .map_err(|e| {
                UserbaseError::store_unavailable(format!("Failed to put key '{redis_key}': {e}"))
            })?;

        debug!("Redis store: put '{}'", redis_key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> UserbaseResult<()> {
        let redis_key = self.keys.record(key);
        let mut conn = self.conn().await?;

        let deleted: i64 = conn.del(&redis_key).await.map_err(|e| {
            UserbaseError::store_unavailable(format!("Failed to delete key '{redis_key}': {e}"))
        })?;

        debug!("Redis store: delete '{}' (existed: {})", redis_key, deleted > 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> Item {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_redis_keys() {
        let keys = RedisKeys::new("test", "people");

        assert_eq!(keys.record("a@b.com"), "test:people:a@b.com");
        assert_eq!(keys.pattern(), "test:people:*");
    }

    #[test]
    fn test_pattern_escapes_glob_characters() {
        let keys = RedisKeys::new("app[1]", "t*");
        assert_eq!(keys.pattern(), "app\\[1\\]:t\\*:*");
        assert_eq!(keys.record("a@b.com"), "app[1]:t*:a@b.com");
    }

    #[test]
    fn test_item_to_fields() {
        let fields = item_to_fields(&item(json!({
            "email": "a@b.com",
            "first_name": "Ada",
            "last_name": ""
        })))
        .unwrap();

        let fields: HashMap<_, _> = fields.into_iter().collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["email"], "a@b.com");
        assert_eq!(fields["last_name"], "");
    }

    #[test]
    fn test_item_to_fields_rejects_non_strings() {
        let err = item_to_fields(&item(json!({ "email": "a@b.com", "age": 3 }))).unwrap_err();
        assert!(matches!(err, UserbaseError::Encoding(_)));
    }

    #[test]
    fn test_fields_to_item() {
        let mut fields = HashMap::new();
        fields.insert("email".to_string(), "a@b.com".to_string());
        fields.insert("first_name".to_string(), "Ada".to_string());

        let converted = fields_to_item(fields);
        assert_eq!(
            Value::Object(converted),
            json!({ "email": "a@b.com", "first_name": "Ada" })
        );
    }
}
