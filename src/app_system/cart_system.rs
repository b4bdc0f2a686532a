use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actors::CartService;
use crate::catalog::CatalogService;
use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::notify::NotificationSink;
use crate::storage::{CartStorage, KeyValueStore};

/// Starts the cart service and owns its task.
///
/// The stored snapshot is read once at startup; an absent or unusable snapshot
/// starts an empty cart.
pub struct CartSystem {
    pub client: CartClient,
    handle: tokio::task::JoinHandle<()>,
}

impl CartSystem {
    #[instrument(name = "cart_system", skip_all, fields(key = %config.storage_key))]
    pub async fn start(
        config: &CartConfig,
        catalog: Arc<dyn CatalogService>,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        info!("Starting cart system");

        let storage = CartStorage::new(store, config.storage_key.clone());
        let initial = storage.load().await.unwrap_or_default();
        let (service, client) = CartService::new(config, initial, catalog, storage, notifier);
        let handle = tokio::spawn(service.run());

        info!("Cart system started");
        Self { client, handle }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart system");
        let _ = self.client.shutdown().await;

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Service shutdown error");
            return Err(format!("Cart service task failed: {e:?}"));
        }

        info!("Cart system shutdown complete");
        Ok(())
    }
}
