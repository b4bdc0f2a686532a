use serde::{Deserialize, Serialize};

use super::ProductId;

/// Maximum purchasable quantity for a product, as reported by the catalog.
///
/// Never cached: the cart fetches a fresh record for every mutation that needs one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

impl Stock {
    pub fn new(id: ProductId, amount: u32) -> Self {
        Self { id, amount }
    }

    /// Whether `requested` units fit within this stock level.
    pub fn covers(&self, requested: i64) -> bool {
        requested <= i64::from(self.amount)
    }
}
