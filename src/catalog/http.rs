use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{CatalogError, CatalogService};
use crate::domain::{Product, ProductId, Stock};

/// REST catalog client.
///
/// Expects `GET {base}/products/{id}` and `GET {base}/stock/{id}` to return JSON
/// bodies shaped like [`Product`] and [`Stock`].
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpCatalog {
    /// # Arguments
    /// * `base_url` - Root of the catalog API (e.g. "http://localhost:3333")
    /// * `timeout` - Per-request timeout applied by the HTTP client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn url(&self, resource: &str, id: ProductId) -> String {
        format!("{}/{}/{}", self.base_url, resource, id)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = self.url(resource, id);
        debug!(%url, "Sending request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Timeout(self.timeout)
            } else {
                CatalogError::Network(e.to_string())
            }
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(CatalogError::NotFound(id)),
            status if !status.is_success() => {
                return Err(CatalogError::Network(format!("HTTP {status}")));
            }
            _ => {}
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogService for HttpCatalog {
    #[instrument(skip(self))]
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.fetch("products", id).await
    }

    #[instrument(skip(self))]
    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.fetch("stock", id).await
    }
}
