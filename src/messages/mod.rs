use tokio::sync::oneshot;

use crate::domain::{Cart, ProductId};
use crate::error::CartError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests handled by the cart service. Every mutation answers with the
/// snapshot that became visible, or the reason nothing changed.
#[derive(Debug)]
pub enum CartRequest {
    AddProduct {
        id: ProductId,
        respond_to: ServiceResponse<Cart, CartError>,
    },
    UpdateProductAmount {
        id: ProductId,
        delta: i64,
        respond_to: ServiceResponse<Cart, CartError>,
    },
    RemoveProduct {
        id: ProductId,
        respond_to: ServiceResponse<Cart, CartError>,
    },
    Shutdown,
}
