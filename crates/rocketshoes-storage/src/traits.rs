//! # Persistent Store Trait
//!
//! The key/value interface the cart mirror is written through.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    PersistentStore                                      │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │      SqliteStorage       │      │      MemoryStorage       │        │
//! │  │  local_storage table     │      │  RwLock<HashMap>         │        │
//! │  │  survives restarts       │      │  tests, guest sessions   │        │
//! │  └──────────────────────────┘      └──────────────────────────┘        │
//! │                                                                         │
//! │  Every call completes before the caller continues, so a cart           │
//! │  operation returns only after its write has landed.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use crate::error::StorageResult;

/// Async key/value store holding string values.
///
/// ## Design Notes
/// - `set` overwrites any existing value under the key
/// - `remove` of an absent key is not an error
#[async_trait]
pub trait PersistentStore: Send + Sync {
    /// Returns the value under `key`, or `None` if nothing was stored.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes the value under `key`.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}
