use thiserror::Error;

use crate::catalog::CatalogError;
use crate::domain::ProductId;
use crate::notify::NoticeKind;
use crate::storage::StorageError;

/// A collaborator failure underneath a cart operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Why a cart operation left the cart unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error(
        "requested quantity out of stock: product {id}, requested {requested}, \
         available {available}"
    )]
    OutOfStock { id: ProductId, requested: i64, available: u32 },
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),
    #[error("product {id} cannot hold {requested} units")]
    InvalidAmount { id: ProductId, requested: i64 },
    #[error("error adding product: {0}")]
    AddProductFailed(#[source] BackendError),
    #[error("error updating product quantity: {0}")]
    UpdateAmountFailed(#[source] BackendError),
    #[error("error removing product: {0}")]
    RemoveProductFailed(#[source] BackendError),
    #[error("cart service unavailable: {0}")]
    Unavailable(String),
}

impl CartError {
    /// Category reported to the user, if any.
    ///
    /// `NotInCart` and `InvalidAmount` only come out of quantity updates and are
    /// reported as such. `Unavailable` happens on the caller's side of the channel
    /// and never reaches the sink.
    pub fn notice_kind(&self) -> Option<NoticeKind> {
        match self {
            CartError::OutOfStock { .. } => Some(NoticeKind::OutOfStock),
            CartError::AddProductFailed(_) => Some(NoticeKind::AddProductFailed),
            CartError::NotInCart(_)
            | CartError::InvalidAmount { .. }
            | CartError::UpdateAmountFailed(_) => Some(NoticeKind::UpdateAmountFailed),
            CartError::RemoveProductFailed(_) => Some(NoticeKind::RemoveProductFailed),
            CartError::Unavailable(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_kinds() {
        let out_of_stock = CartError::OutOfStock { id: 5, requested: 6, available: 5 };
        assert_eq!(out_of_stock.notice_kind(), Some(NoticeKind::OutOfStock));
        assert_eq!(CartError::NotInCart(5).notice_kind(), Some(NoticeKind::UpdateAmountFailed));

        let add = CartError::AddProductFailed(CatalogError::NotFound(5).into());
        assert_eq!(add.notice_kind(), Some(NoticeKind::AddProductFailed));

        let disk_full = StorageError::Write("disk full".to_string());
        let remove = CartError::RemoveProductFailed(disk_full.into());
        assert_eq!(remove.notice_kind(), Some(NoticeKind::RemoveProductFailed));

        assert_eq!(CartError::Unavailable("closed".to_string()).notice_kind(), None);
    }

    #[test]
    fn test_messages_carry_the_cause() {
        let err = CartError::AddProductFailed(CatalogError::NotFound(5).into());
        assert_eq!(err.to_string(), "error adding product: product not found: 5");
    }
}
