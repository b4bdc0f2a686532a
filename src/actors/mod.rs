use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};

use crate::catalog::{CatalogError, CatalogService};
use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::domain::{Cart, CartItem, Product, ProductId, Stock};
use crate::error::{BackendError, CartError};
use crate::messages::{CartRequest, ServiceResponse};
use crate::notify::NotificationSink;
use crate::storage::CartStorage;

// =============================================================================
// CART SERVICE
// =============================================================================

/// Owns the authoritative cart.
///
/// Requests are handled one at a time, so a mutation always reads, validates,
/// persists and publishes before the next one starts. Each mutation builds a
/// full candidate snapshot and only publishes it once the save succeeded.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
    publisher: watch::Sender<Cart>,
    catalog: Arc<dyn CatalogService>,
    storage: CartStorage,
    notifier: Arc<dyn NotificationSink>,
    catalog_timeout: Duration,
    check_stock_on_first_add: bool,
}

impl CartService {
    pub fn new(
        config: &CartConfig,
        initial: Cart,
        catalog: Arc<dyn CatalogService>,
        storage: CartStorage,
        notifier: Arc<dyn NotificationSink>,
    ) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(config.buffer_size);
        let (publisher, state) = watch::channel(initial.clone());
        let service = Self {
            receiver,
            cart: initial,
            publisher,
            catalog,
            storage,
            notifier,
            catalog_timeout: config.catalog_timeout,
            check_stock_on_first_add: config.check_stock_on_first_add,
        };
        let client = CartClient::new(sender, state);
        (service, client)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!(items = self.cart.len(), "CartService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddProduct { id, respond_to } => {
                    let result = self.add_product(id).await;
                    self.respond(result, respond_to);
                }
                CartRequest::UpdateProductAmount { id, delta, respond_to } => {
                    let result = self.update_product_amount(id, delta).await;
                    self.respond(result, respond_to);
                }
                CartRequest::RemoveProduct { id, respond_to } => {
                    let result = self.remove_product(id).await;
                    self.respond(result, respond_to);
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }
        info!("CartService stopped");
    }

    /// Reports failures to the sink, then answers the caller.
    fn respond(
        &self,
        result: Result<Cart, CartError>,
        respond_to: ServiceResponse<Cart, CartError>,
    ) {
        if let Err(e) = &result {
            if let Some(kind) = e.notice_kind() {
                self.notifier.notify(kind, kind.default_message());
            }
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = id), skip(self))]
    async fn add_product(&mut self, id: ProductId) -> Result<Cart, CartError> {
        debug!("Processing add_product request");

        let next = match self.cart.get(id).map(|item| item.amount) {
            Some(held) => {
                let stock = self.fetch_stock(id).await.map_err(|e| {
                    error!(error = %e, "Stock lookup failed");
                    CartError::AddProductFailed(e.into())
                })?;
                if held >= stock.amount {
                    warn!(held, available = stock.amount, "Out of stock");
                    return Err(CartError::OutOfStock {
                        id,
                        requested: i64::from(held) + 1,
                        available: stock.amount,
                    });
                }
                self.cart.with_amount(id, held + 1)
            }
            None => {
                let product = self.fetch_product(id).await.map_err(|e| {
                    error!(error = %e, "Product lookup failed");
                    CartError::AddProductFailed(e.into())
                })?;
                if product.id != id {
                    error!(returned_id = product.id, "Catalog returned a different product");
                    let mismatch =
                        CatalogError::Decode(format!("expected product {id}, got {}", product.id));
                    return Err(CartError::AddProductFailed(mismatch.into()));
                }
                if self.check_stock_on_first_add {
                    let stock = self
                        .fetch_stock(id)
                        .await
                        .map_err(|e| CartError::AddProductFailed(e.into()))?;
                    if stock.amount == 0 {
                        warn!("Out of stock");
                        return Err(CartError::OutOfStock { id, requested: 1, available: 0 });
                    }
                }
                info!(product_name = %product.name, "Adding new product");
                self.cart.with_item_appended(CartItem::from_product(product, 1))
            }
        };

        // Both helpers only refuse states ruled out above.
        let next = next.ok_or_else(|| {
            error!("Candidate cart could not be built");
            unbuildable_add(id)
        })?;
        self.commit(next, CartError::AddProductFailed).await
    }

    #[instrument(fields(product_id = id), skip(self))]
    async fn update_product_amount(
        &mut self,
        id: ProductId,
        delta: i64,
    ) -> Result<Cart, CartError> {
        debug!("Processing update_product_amount request");

        let held = match self.cart.get(id) {
            Some(item) => item.amount,
            None => {
                warn!("Product is not in the cart");
                return Err(CartError::NotInCart(id));
            }
        };

        let requested = i64::from(held).saturating_add(delta);
        if requested < 1 {
            warn!(requested, "Amount would drop below one");
            return Err(CartError::InvalidAmount { id, requested });
        }

        let stock = self.fetch_stock(id).await.map_err(|e| {
            error!(error = %e, "Stock lookup failed");
            CartError::UpdateAmountFailed(e.into())
        })?;
        if !stock.covers(requested) {
            warn!(requested, available = stock.amount, "Out of stock");
            return Err(CartError::OutOfStock {
                id,
                requested,
                available: stock.amount,
            });
        }

        // `covers` bounds `requested` by a u32 stock level.
        let amount = u32::try_from(requested)
            .map_err(|_| CartError::InvalidAmount { id, requested })?;
        let next = self.cart.with_amount(id, amount).ok_or(CartError::NotInCart(id))?;
        self.commit(next, CartError::UpdateAmountFailed).await
    }

    #[instrument(fields(product_id = id), skip(self))]
    async fn remove_product(&mut self, id: ProductId) -> Result<Cart, CartError> {
        debug!("Processing remove_product request");

        match self.cart.without(id) {
            Some(next) => self.commit(next, CartError::RemoveProductFailed).await,
            None => {
                debug!("Product is not in the cart, nothing to remove");
                Ok(self.cart.clone())
            }
        }
    }

    /// Persists `next` and, once stored, makes it the visible cart.
    async fn commit(
        &mut self,
        next: Cart,
        on_failure: fn(BackendError) -> CartError,
    ) -> Result<Cart, CartError> {
        if let Err(e) = self.storage.save(&next).await {
            error!(error = %e, "Could not persist cart");
            return Err(on_failure(e.into()));
        }
        self.cart = next.clone();
        self.publisher.send_replace(next.clone());
        info!(items = next.len(), units = next.total_units(), "Cart updated");
        Ok(next)
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        timeout(self.catalog_timeout, self.catalog.get_product(id))
            .await
            .map_err(|_| CatalogError::Timeout(self.catalog_timeout))?
    }

    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        timeout(self.catalog_timeout, self.catalog.get_stock(id))
            .await
            .map_err(|_| CatalogError::Timeout(self.catalog_timeout))?
    }
}

/// Add failure for a candidate cart the copy-on-write helpers refused to build.
fn unbuildable_add(id: ProductId) -> CartError {
    let cause = CatalogError::Decode(format!("product {id} cannot be added to the cart"));
    CartError::AddProductFailed(cause.into())
}
