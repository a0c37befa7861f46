//! # Userbase Repository
//!
//! The record store adapter: a narrow async interface over four key-value
//! primitives, and the backends that implement it.
//!
//! ```text
//! UserService
//!   ↓  Arc<dyn RecordStore>
//! InMemoryRecordStore | RedisRecordStore
//!   ↓
//! HashMap | Redis
//! ```

pub mod memory;
pub mod redis_store;
pub mod traits;

pub use memory::InMemoryRecordStore;
pub use redis_store::{create_pool, RedisKeys, RedisRecordStore};
pub use traits::*;
