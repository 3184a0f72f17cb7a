//! The cart store: stock-validated mutations with durable persistence.
//!
//! `CartStore` owns the single authoritative in-memory [`Cart`] for a UI
//! session. Every operation is a one-step transaction: validate against the
//! stock oracle, build a candidate collection by transform-and-collect,
//! then commit (persist the candidate, and only after the write succeeds
//! replace the live collection). A failed commit therefore never leaves
//! memory and storage diverged.
//!
//! Failures never propagate to the consumer: each failure path emits
//! exactly one message on the notification sink and leaves the cart
//! unchanged. Success emits nothing; consumers observe it through
//! [`CartStore::items`].

use std::sync::Arc;

use tracing::{instrument, warn};

use rocketshoes_core::ProductId;

use crate::error::CartError;
use crate::ports::{CartStorage, NotificationSink, ProductCatalog, StockOracle};
use crate::types::{Cart, CartItem};

/// Fixed storage key under which the serialized cart lives.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// User-facing message for stock validation failures.
pub const MSG_OUT_OF_STOCK: &str = "Requested quantity is out of stock";
/// User-facing message for any other add failure.
pub const MSG_ADD_FAILED: &str = "Error adding product";
/// User-facing message for any other removal failure.
pub const MSG_REMOVE_FAILED: &str = "Error removing product";
/// User-facing message for any other quantity-change failure.
pub const MSG_UPDATE_FAILED: &str = "Error changing product quantity";

/// The authoritative cart for one UI session.
///
/// Collaborators are injected at composition time; consumers hold an
/// explicit reference to the store rather than reaching for ambient state.
/// Operations take `&mut self`, so overlapping mutations on one store are
/// unrepresentable; the UI drives them one user action at a time.
pub struct CartStore {
    cart: Cart,
    catalog: Arc<dyn ProductCatalog>,
    stock: Arc<dyn StockOracle>,
    storage: Box<dyn CartStorage>,
    notifier: Arc<dyn NotificationSink>,
}

impl CartStore {
    /// Create a store, bootstrapping the cart from `storage`.
    ///
    /// The stored blob is read exactly once, here. If it is absent or
    /// undecodable the session starts with an empty cart.
    #[must_use]
    pub fn new(
        storage: Box<dyn CartStorage>,
        catalog: Arc<dyn ProductCatalog>,
        stock: Arc<dyn StockOracle>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let cart = bootstrap(storage.as_ref());
        Self {
            cart,
            catalog,
            stock,
            storage,
            notifier,
        }
    }

    /// The current line items, in insertion order. Read-only; mutations go
    /// through the three operations.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// The current cart collection.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of `product_id` to the cart.
    ///
    /// A product not yet in the cart is appended with amount 1 (after a
    /// catalog lookup for its metadata); a product already present has its
    /// amount incremented by 1. Either way the requested amount is
    /// validated against the stock oracle first, and any failure leaves the
    /// cart unchanged and emits one notification.
    #[instrument(skip(self))]
    pub async fn add_product(&mut self, product_id: ProductId) {
        if let Err(err) = self.try_add_product(product_id).await {
            self.report(&err, MSG_ADD_FAILED);
        }
    }

    /// Remove the `product_id` line from the cart entirely.
    ///
    /// Removing a product that is not in the cart emits a notification and
    /// changes nothing.
    #[instrument(skip(self))]
    pub fn remove_product(&mut self, product_id: ProductId) {
        if let Err(err) = self.try_remove_product(product_id) {
            self.report(&err, MSG_REMOVE_FAILED);
        }
    }

    /// Set the `product_id` line's amount to exactly `amount`.
    ///
    /// An `amount <= 0` is a silent no-op, guarding against accidental
    /// zero/negative sets from spinner-style UI controls. Otherwise the
    /// amount is validated against the stock oracle and applied as an
    /// absolute set, not a delta.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&mut self, product_id: ProductId, amount: i64) {
        if amount <= 0 {
            return;
        }
        if let Err(err) = self.try_update_product_amount(product_id, amount).await {
            self.report(&err, MSG_UPDATE_FAILED);
        }
    }

    async fn try_add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let current = self.cart.get(product_id).map(|item| item.amount);

        let next = match current {
            None => {
                let product = self.catalog.product(product_id).await?;
                let stock = self.stock.stock(product_id).await?;
                if stock.amount < 1 {
                    return Err(CartError::OutOfStock);
                }
                self.cart.with_item(CartItem::from_product(product, 1))
            }
            Some(amount) => {
                let wanted = amount.saturating_add(1);
                let stock = self.stock.stock(product_id).await?;
                if stock.amount < wanted {
                    return Err(CartError::OutOfStock);
                }
                self.cart.with_amount(product_id, wanted)
            }
        };

        self.commit(next)
    }

    fn try_remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        if !self.cart.contains(product_id) {
            return Err(CartError::NotInCart(product_id));
        }
        let next = self.cart.without(product_id);
        self.commit(next)
    }

    async fn try_update_product_amount(
        &mut self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        let stock = self.stock.stock(product_id).await?;
        if i64::from(stock.amount) < amount {
            return Err(CartError::OutOfStock);
        }
        // amount is in 1..=stock.amount here, so it fits in u32
        let requested = u32::try_from(amount).map_err(|_| CartError::OutOfStock)?;

        if !self.cart.contains(product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        let next = self.cart.with_amount(product_id, requested);
        self.commit(next)
    }

    /// Persist `next`, then make it the live collection.
    fn commit(&mut self, next: Cart) -> Result<(), CartError> {
        let blob = serde_json::to_string(&next)?;
        self.storage.set(CART_STORAGE_KEY, &blob)?;
        self.cart = next;
        Ok(())
    }

    /// Convert an operation failure into its single user-facing message.
    fn report(&self, err: &CartError, generic: &str) {
        warn!(error = %err, "cart operation failed");
        let message = match err {
            CartError::OutOfStock => MSG_OUT_OF_STOCK,
            _ => generic,
        };
        self.notifier.error(message);
    }
}

/// One-time load of the cart from durable storage.
fn bootstrap(storage: &dyn CartStorage) -> Cart {
    match storage.get(CART_STORAGE_KEY) {
        Ok(Some(blob)) => match serde_json::from_str(&blob) {
            Ok(cart) => cart,
            Err(err) => {
                warn!(error = %err, "stored cart is undecodable, starting empty");
                Cart::new()
            }
        },
        Ok(None) => Cart::new(),
        Err(err) => {
            warn!(error = %err, "failed to read stored cart, starting empty");
            Cart::new()
        }
    }
}
