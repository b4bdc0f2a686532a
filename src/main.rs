use std::sync::Arc;

use tracing::{error, info, warn, Instrument};

use cart_store::app_system::{setup_tracing, CartSystem};
use cart_store::catalog::{CatalogService, HttpCatalog, InMemoryCatalog};
use cart_store::config::CartConfig;
use cart_store::notify::TracingNotifier;
use cart_store::storage::FileStore;
use cart_store::Product;

fn demo_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_product(Product::new(1, "Running Sneaker", 179.9, "sneaker-1.jpg"), 3)
        .with_product(Product::new(2, "Trail Shoe", 139.9, "trail-2.jpg"), 5)
        .with_product(Product::new(3, "Canvas Slip-on", 99.9, "slipon-3.jpg"), 2)
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = CartConfig::from_env().map_err(|e| e.to_string())?;
    setup_tracing(&config.log_filter);

    info!("Starting cart demo");

    let catalog: Arc<dyn CatalogService> = match &config.catalog_base_url {
        Some(url) => {
            info!(%url, "Using remote catalog");
            Arc::new(HttpCatalog::new(url, config.catalog_timeout).map_err(|e| e.to_string())?)
        }
        None => {
            info!("Using built-in demo catalog");
            Arc::new(demo_catalog())
        }
    };
    let store = Arc::new(FileStore::new(&config.data_dir));

    let system = CartSystem::start(&config, catalog, store, Arc::new(TracingNotifier)).await;
    let client = system.client.clone();

    let span = tracing::info_span!("shopping");
    async {
        for id in [1, 2, 1] {
            if let Err(e) = client.add_product(id).await {
                warn!(product_id = id, error = %e, "Add rejected");
            }
        }
        if let Err(e) = client.update_product_amount(2, 10).await {
            warn!(product_id = 2, error = %e, "Update rejected");
        }
        if let Err(e) = client.remove_product(3).await {
            error!(product_id = 3, error = %e, "Remove failed");
        }
    }
    .instrument(span)
    .await;

    let cart = client.get_cart();
    for item in cart.items() {
        info!(product_id = item.id, name = %item.name, amount = item.amount, "In cart");
    }
    info!(items = cart.len(), units = cart.total_units(), subtotal = cart.subtotal(), "Final cart");

    system.shutdown().await?;

    info!("Cart demo completed");
    Ok(())
}
