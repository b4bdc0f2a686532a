use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::{KeyValueStore, StorageError};
use crate::domain::Cart;

/// Storage key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// Persists cart snapshots as a JSON array under a single key.
#[derive(Clone)]
pub struct CartStorage {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl CartStorage {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored snapshot.
    ///
    /// Returns `None` when nothing is stored or the entry cannot be used: read
    /// failures, malformed JSON and snapshots with duplicate ids or empty lines
    /// are logged and treated as absent.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn load(&self) -> Option<Cart> {
        let bytes = match self.store.get(&self.key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No stored cart");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Could not read stored cart");
                return None;
            }
        };

        match serde_json::from_slice::<Cart>(&bytes) {
            Ok(cart) => {
                info!(items = cart.len(), "Stored cart loaded");
                Some(cart)
            }
            Err(e) => {
                warn!(error = %e, "Stored cart is unusable");
                None
            }
        }
    }

    #[instrument(skip(self, cart), fields(key = %self.key, items = cart.len()))]
    pub async fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(cart)?;
        self.store.set(&self.key, &bytes).await?;
        debug!("Cart snapshot saved");
        Ok(())
    }
}
