//! # Cart Store
//!
//! Client-side shopping cart state: an in-memory list of products with
//! quantities, validated against a remote stock source and persisted to local
//! storage on every change.
//!
//! The cart lives inside a [`CartService`](actors::CartService) task. Callers
//! talk to it through a cloneable [`CartClient`](clients::CartClient):
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use cart_store::{app_system::CartSystem, catalog::InMemoryCatalog, config::CartConfig,
//! #     notify::TracingNotifier, storage::MemoryStore};
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let system = CartSystem::start(
//!     &CartConfig::default(),
//!     Arc::new(InMemoryCatalog::new()),
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(TracingNotifier),
//! )
//! .await;
//!
//! system.client.add_product(5).await?;
//! let cart = system.client.get_cart();
//! # let _ = cart;
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Failed mutations leave both the visible and the stored cart untouched and
//! report one of four notice kinds to the configured
//! [`NotificationSink`](notify::NotificationSink).

pub mod actors;
pub mod app_system;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod messages;
pub mod notify;
pub mod storage;

#[cfg(test)]
mod mock_framework;

pub use clients::CartClient;
pub use domain::{Cart, CartItem, Product, ProductId, Stock};
pub use error::CartError;
