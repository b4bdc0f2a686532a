use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{CatalogError, CatalogService};
use crate::domain::{Product, ProductId, Stock};

/// In-process catalog backed by two maps.
///
/// Used by the demo binary and by tests. `set_offline(true)` makes every lookup
/// fail as if the network were down.
#[derive(Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    stock: RwLock<HashMap<ProductId, u32>>,
    offline: AtomicBool,
    product_lookups: AtomicUsize,
    stock_lookups: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a product together with its stock level.
    pub fn with_product(self, product: Product, stock: u32) -> Self {
        self.set_stock(product.id, stock);
        self.insert_product(product);
        self
    }

    pub fn insert_product(&self, product: Product) {
        if let Ok(mut products) = self.products.write() {
            products.insert(product.id, product);
        }
    }

    pub fn set_stock(&self, id: ProductId, amount: u32) {
        if let Ok(mut stock) = self.stock.write() {
            stock.insert(id, amount);
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn product_lookups(&self) -> usize {
        self.product_lookups.load(Ordering::SeqCst)
    }

    pub fn stock_lookups(&self) -> usize {
        self.stock_lookups.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), CatalogError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(CatalogError::Network("catalog is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    #[instrument(skip(self))]
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.product_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        let products = self
            .products
            .read()
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        let product = products.get(&id).cloned().ok_or(CatalogError::NotFound(id))?;
        debug!(product_name = %product.name, "Product found");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.stock_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        let stock = self
            .stock
            .read()
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        let amount = stock.get(&id).copied().ok_or(CatalogError::NotFound(id))?;
        debug!(amount, "Stock level found");
        Ok(Stock::new(id, amount))
    }
}
