//! Cart operation error taxonomy.
//!
//! Every variant is recoverable: the store converts each failure into a
//! single notification at the operation boundary and stays usable.

use thiserror::Error;

use rocketshoes_core::ProductId;

use crate::api::ApiError;
use crate::storage::StorageError;

/// Errors raised by cart store operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested or required amount exceeds the reported stock level.
    #[error("requested quantity out of stock")]
    OutOfStock,

    /// The operation target does not exist in the current cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Catalog or stock lookup failed.
    #[error("lookup failed: {0}")]
    Lookup(#[from] ApiError),

    /// The committed cart could not be serialized.
    #[error("cart serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the serialized cart to durable storage failed. The
    /// in-memory cart is still the pre-operation state.
    #[error("persistence failed: {0}")]
    Persistence(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CartError::OutOfStock.to_string(),
            "requested quantity out of stock"
        );
        assert_eq!(
            CartError::NotInCart(ProductId::new(9)).to_string(),
            "product 9 is not in the cart"
        );
    }
}
