use serde::{Deserialize, Serialize};

/// Catalog identifier shared by products, stock records and cart items.
pub type ProductId = u64;

/// A purchasable product as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(alias = "title")]
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

/// A product held in the cart, together with the quantity the user intends to buy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    #[serde(alias = "title")]
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub amount: u32,
}

impl CartItem {
    /// Creates a cart line from a catalog record.
    ///
    /// # Arguments
    /// * `product` - The catalog product entering the cart
    /// * `amount` - Initial quantity held
    pub fn from_product(product: Product, amount: u32) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            amount,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}
