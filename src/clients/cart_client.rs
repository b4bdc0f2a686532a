use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use crate::domain::{Cart, ProductId};
use crate::error::CartError;
use crate::messages::CartRequest;

/// Handle to the cart service.
///
/// Cheap to clone; pass it to every consumer that reads or changes the cart.
/// Reads come straight from the last published snapshot and never wait on the
/// service.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    state: watch::Receiver<Cart>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>, state: watch::Receiver<Cart>) -> Self {
        Self { sender, state }
    }

    /// The currently visible cart.
    pub fn get_cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// A receiver that is notified every time a new snapshot becomes visible.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.clone()
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|_| CartError::Unavailable("cart service closed".to_string()))
    }
}

client_method!(CartClient => fn add_product(id: ProductId) -> Cart as CartRequest::AddProduct);
client_method!(CartClient => fn update_product_amount(id: ProductId, delta: i64) -> Cart
    as CartRequest::UpdateProductAmount);
client_method!(CartClient => fn remove_product(id: ProductId) -> Cart
    as CartRequest::RemoveProduct);
