//! Common test infrastructure for Redis integration tests.

use serde_json::{json, Value};
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::{Redis, REDIS_PORT};
use userbase_config::{StoreBackend, StoreConfig};
use userbase_core::Item;
use userbase_repository::RedisRecordStore;

/// Test Redis container wrapper.
///
/// Keeps the container alive for as long as the store is in use.
pub struct TestRedis {
    _container: ContainerAsync<Redis>,
    config: StoreConfig,
}

impl TestRedis {
    /// Starts a fresh Redis container.
    pub async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(REDIS_PORT)
            .await
            .expect("Failed to get Redis port");

        let config = StoreConfig {
            backend: StoreBackend::Redis,
            table_name: "users_test".to_string(),
            redis_url: format!("redis://127.0.0.1:{port}"),
            pool_size: 4,
            key_prefix: "userbase".to_string(),
        };

        Self {
            _container: container,
            config,
        }
    }

    /// Connects a store to the container, retrying while Redis starts up.
    pub async fn store(&self) -> RedisRecordStore {
        self.store_for_table(&self.config.table_name).await
    }

    /// Connects a store scoped to another table in the same container.
    pub async fn store_for_table(&self, table_name: &str) -> RedisRecordStore {
        let config = StoreConfig {
            table_name: table_name.to_string(),
            ..self.config.clone()
        };

        let max_attempts = 30;
        let mut attempts = 0;
        loop {
            attempts += 1;
            match RedisRecordStore::connect(&config).await {
                Ok(store) => return store,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("Failed to connect to Redis after {max_attempts} attempts: {e}");
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
                }
            }
        }
    }
}

/// Builds a user item.
pub fn user_item(email: &str, first_name: &str, last_name: &str) -> Item {
    match json!({ "email": email, "first_name": first_name, "last_name": last_name }) {
        Value::Object(item) => item,
        _ => unreachable!(),
    }
}
