//! Domain types for the cart and the catalog/stock API.
//!
//! Field renames keep the wire shape of the storefront REST API (`image`)
//! and of previously persisted carts, while the Rust names stay
//! domain-flavored (`product_id`, `image_url`).

use serde::{Deserialize, Serialize};

use rocketshoes_core::{Price, ProductId};

// =============================================================================
// Catalog & Stock
// =============================================================================

/// Product metadata as returned by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Product image URL.
    #[serde(rename = "image")]
    pub image_url: String,
}

/// Point-in-time available quantity for a product, as reported by the
/// stock endpoint. Never cached beyond the single validating call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Product the level refers to.
    pub id: ProductId,
    /// Units currently available.
    pub amount: u32,
}

// =============================================================================
// Cart
// =============================================================================

/// One product entry in the cart plus its requested quantity.
///
/// Invariant: `amount >= 1` for any item present in a [`Cart`]; an item
/// whose amount would drop to 0 is removed instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Display title, copied from the catalog at add time.
    pub title: String,
    /// Unit price, copied from the catalog at add time.
    pub price: Price,
    /// Product image URL.
    #[serde(rename = "image")]
    pub image_url: String,
    /// Requested quantity.
    pub amount: u32,
}

impl CartItem {
    /// Create a line item from catalog metadata.
    #[must_use]
    pub fn from_product(product: Product, amount: u32) -> Self {
        Self {
            product_id: product.id,
            title: product.title,
            price: product.price,
            image_url: product.image_url,
            amount,
        }
    }

    /// The line total (`price * amount`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.amount)
    }
}

/// Ordered cart collection, unique by product ID.
///
/// Insertion order is preserved across adds; removal and update never
/// reorder. All mutation helpers are pure: they build a new `Cart` by
/// transform-and-collect and leave `self` untouched, so a caller can hold
/// the current collection and a candidate next collection without aliasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line item by product ID.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Whether the cart contains a line item for `product_id`.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Sum of `price * amount` over all line items.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// A new cart with `item` appended.
    ///
    /// The caller is responsible for `item.product_id` not already being
    /// present; [`Cart::with_amount`] is the way to change an existing line.
    #[must_use]
    pub fn with_item(&self, item: CartItem) -> Self {
        let mut items = self.items.clone();
        items.push(item);
        Self { items }
    }

    /// A new cart with the `product_id` line's amount set to `amount`,
    /// other lines untouched and order preserved.
    #[must_use]
    pub fn with_amount(&self, product_id: ProductId, amount: u32) -> Self {
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.product_id == product_id {
                    CartItem {
                        amount,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Self { items }
    }

    /// A new cart without the `product_id` line, other lines in their
    /// original order.
    #[must_use]
    pub fn without(&self, product_id: ProductId) -> Self {
        let items = self
            .items
            .iter()
            .filter(|item| item.product_id != product_id)
            .cloned()
            .collect();
        Self { items }
    }
}
