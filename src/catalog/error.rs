use std::time::Duration;

use thiserror::Error;

use crate::domain::ProductId;

/// Failures surfaced by a catalog lookup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("product not found: {0}")]
    NotFound(ProductId),
    #[error("catalog network error: {0}")]
    Network(String),
    #[error("catalog did not answer within {0:?}")]
    Timeout(Duration),
    #[error("could not decode catalog response: {0}")]
    Decode(String),
}
