//! # Mock Framework
//!
//! Utilities for testing [`CartClient`] without a running
//! [`CartService`](crate::actors::CartService).
//!
//! [`create_mock_client`] hands back the client together with the receiving end
//! of its request channel and the publishing end of its state channel. Helpers
//! like [`expect_add_product`] pull the next request so a test can script the
//! service's answer.

use tokio::sync::{mpsc, watch};

use crate::clients::CartClient;
use crate::domain::{Cart, ProductId};
use crate::error::CartError;
use crate::messages::{CartRequest, ServiceResponse};

pub fn create_mock_client(
    buffer_size: usize,
) -> (CartClient, mpsc::Receiver<CartRequest>, watch::Sender<Cart>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (publisher, state) = watch::channel(Cart::new());
    (CartClient::new(sender, state), receiver, publisher)
}

/// Helper to verify that the next message is an AddProduct request
pub async fn expect_add_product(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(ProductId, ServiceResponse<Cart, CartError>)> {
    match receiver.recv().await {
        Some(CartRequest::AddProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an UpdateProductAmount request
pub async fn expect_update_product_amount(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(ProductId, i64, ServiceResponse<Cart, CartError>)> {
    match receiver.recv().await {
        Some(CartRequest::UpdateProductAmount {
            id,
            delta,
            respond_to,
        }) => Some((id, delta, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a RemoveProduct request
pub async fn expect_remove_product(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(ProductId, ServiceResponse<Cart, CartError>)> {
    match receiver.recv().await {
        Some(CartRequest::RemoveProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CartItem, Product};

    #[tokio::test]
    async fn test_mock_client_add_product() {
        let (client, mut receiver, _publisher) = create_mock_client(10);

        let add_task = tokio::spawn(async move { client.add_product(5).await });

        let (id, responder) = expect_add_product(&mut receiver)
            .await
            .expect("Expected AddProduct request");
        assert_eq!(id, 5);
        let cart = Cart::new()
            .with_item_appended(CartItem::from_product(Product::new(5, "Sneaker", 10.0, ""), 1))
            .unwrap();
        responder.send(Ok(cart.clone())).unwrap();

        assert_eq!(add_task.await.unwrap(), Ok(cart));
    }

    #[tokio::test]
    async fn test_mock_client_passes_errors_through() {
        let (client, mut receiver, _publisher) = create_mock_client(10);

        let update_task = tokio::spawn(async move { client.update_product_amount(5, 2).await });

        let (id, delta, responder) = expect_update_product_amount(&mut receiver)
            .await
            .expect("Expected UpdateProductAmount request");
        assert_eq!((id, delta), (5, 2));
        let err = CartError::OutOfStock { id: 5, requested: 11, available: 10 };
        responder.send(Err(err.clone())).unwrap();

        assert_eq!(update_task.await.unwrap(), Err(err));
    }

    #[tokio::test]
    async fn test_dropped_request_reports_unavailable() {
        let (client, mut receiver, _publisher) = create_mock_client(10);

        let remove_task = tokio::spawn(async move { client.remove_product(7).await });

        let (id, responder) = expect_remove_product(&mut receiver)
            .await
            .expect("Expected RemoveProduct request");
        assert_eq!(id, 7);
        drop(responder);

        assert!(matches!(remove_task.await.unwrap(), Err(CartError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_closed_service_reports_unavailable() {
        let (client, receiver, _publisher) = create_mock_client(10);
        drop(receiver);

        assert!(matches!(client.add_product(1).await, Err(CartError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_reads_follow_published_state() {
        let (client, _receiver, publisher) = create_mock_client(10);
        let mut updates = client.subscribe();
        assert!(client.get_cart().is_empty());

        let cart = Cart::new()
            .with_item_appended(CartItem::from_product(Product::new(7, "Boot", 50.0, ""), 2))
            .unwrap();
        publisher.send_replace(cart.clone());

        updates.changed().await.unwrap();
        assert_eq!(*updates.borrow(), cart);
        assert_eq!(client.get_cart(), cart);
    }
}
