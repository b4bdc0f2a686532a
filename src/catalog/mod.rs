//! Remote product catalog: product records and stock levels.

mod error;
pub mod http;
pub mod memory;

pub use error::*;
pub use http::HttpCatalog;
pub use memory::InMemoryCatalog;

use async_trait::async_trait;

use crate::domain::{Product, ProductId, Stock};

/// Query interface the cart uses to look up products and stock.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;
    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError>;
}
