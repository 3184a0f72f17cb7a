//! Collaborator interfaces for the cart store.
//!
//! The cart store only ever talks to the outside world through these
//! traits: the remote catalog and stock endpoints, the durable blob
//! storage, and the user-facing notification sink. Concrete adapters live
//! in [`crate::api`], [`crate::storage`] and [`crate::notify`].

use async_trait::async_trait;

use rocketshoes_core::ProductId;

use crate::api::ApiError;
use crate::storage::StorageError;
use crate::types::{Product, StockLevel};

/// Read-only product metadata lookup.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch the catalog entry for one product. No batching.
    async fn product(&self, product_id: ProductId) -> Result<Product, ApiError>;
}

/// Read-only available-quantity lookup, authoritative for validating
/// quantity increases.
#[async_trait]
pub trait StockOracle: Send + Sync {
    /// Fetch the current stock level for one product. No batching.
    async fn stock(&self, product_id: ProductId) -> Result<StockLevel, ApiError>;
}

/// Durable key-value storage for the serialized cart blob.
///
/// Synchronous from the caller's perspective; the store uses a single
/// fixed key for the whole cart.
pub trait CartStorage: Send {
    /// Read the blob stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `blob` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write does not complete; callers must then
    /// treat the mutation as not having happened.
    fn set(&mut self, key: &str, blob: &str) -> Result<(), StorageError>;
}

/// One-way channel for human-readable failure messages.
///
/// Fire-and-forget: no return value and no delivery guarantee.
pub trait NotificationSink: Send + Sync {
    /// Report a user-facing error message.
    fn error(&self, message: &str);
}
