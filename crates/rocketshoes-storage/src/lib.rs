//! # rocketshoes-storage: Local Storage for the RocketShoes Cart
//!
//! Persists the cart between sessions as a key/value mirror.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Persistence Flow                              │
//! │                                                                         │
//! │  CartStore (rocketshoes-cart)                                          │
//! │       │  save(next) before swap, load() at startup                      │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                rocketshoes-storage (THIS CRATE)                 │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  CartMirror   │───►│PersistentStore│◄───│  Migrations  │  │   │
//! │  │   │  (mirror.rs)  │    │  (traits.rs)  │    │  (embedded)  │  │   │
//! │  │   │  JSON encode  │    │ SqliteStorage │    │ 001_local_   │  │   │
//! │  │   │  key binding  │    │ MemoryStorage │    │   storage    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   ~/.local/share/rocketshoes/storage.db (platform data dir)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`traits`] - The `PersistentStore` key/value trait
//! - [`sqlite`] - SQLite pool and store
//! - [`memory`] - In-memory store
//! - [`mirror`] - Cart encode/decode under the storage key
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rocketshoes_storage::{CartMirror, SqliteStorage, StorageConfig};
//!
//! let storage = SqliteStorage::new(StorageConfig::new("storage.db")).await?;
//! let mirror = CartMirror::new(Arc::new(storage));
//! let cart = mirror.load().await?.unwrap_or_default();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod migrations;
pub mod mirror;
pub mod sqlite;
pub mod traits;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStorage;
pub use mirror::CartMirror;
pub use sqlite::{SqliteStorage, StorageConfig};
pub use traits::PersistentStore;
