//! # Cart Mirror
//!
//! Binds a [`PersistentStore`] to the cart's storage key and handles the
//! JSON encoding.
//!
//! ## Mirror Format
//! ```text
//! key:   @RocketShoes:cart
//! value: [{"id":1,"title":"…","price":179.9,"image":"…","amount":2}, …]
//! ```
//! The same array shape the storefront has always written, so a cart saved
//! by an older build loads unchanged.

use std::sync::Arc;

use rocketshoes_core::{Cart, CART_STORAGE_KEY};
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::traits::PersistentStore;

/// Reads and writes the cart under one storage key.
#[derive(Clone)]
pub struct CartMirror {
    store: Arc<dyn PersistentStore>,
    key: String,
}

impl std::fmt::Debug for CartMirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartMirror").field("key", &self.key).finish()
    }
}

impl CartMirror {
    /// Creates a mirror under the default key.
    pub fn new(store: Arc<dyn PersistentStore>) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    /// Creates a mirror under a custom key.
    pub fn with_key(store: Arc<dyn PersistentStore>, key: impl Into<String>) -> Self {
        CartMirror {
            store,
            key: key.into(),
        }
    }

    /// The storage key this mirror uses.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the mirrored cart.
    ///
    /// ## Returns
    /// * `Ok(None)` - nothing stored yet
    /// * `Ok(Some(cart))` - a valid cart
    /// * `Err(Corrupt)` - the value is not JSON, or breaks a cart invariant
    pub async fn load(&self) -> StorageResult<Option<Cart>> {
        let Some(raw) = self.store.get(&self.key).await? else {
            debug!(key = %self.key, "No mirrored cart");
            return Ok(None);
        };

        let cart: Cart =
            serde_json::from_str(&raw).map_err(|e| StorageError::corrupt(&self.key, e))?;

        debug!(key = %self.key, items = cart.len(), "Loaded mirrored cart");
        Ok(Some(cart))
    }

    /// Writes the full cart, replacing what was stored.
    pub async fn save(&self, cart: &Cart) -> StorageResult<()> {
        let raw = serde_json::to_string(cart)?;
        self.store.set(&self.key, &raw).await
    }

    /// Deletes the mirrored cart.
    pub async fn clear(&self) -> StorageResult<()> {
        self.store.remove(&self.key).await
    }
}
