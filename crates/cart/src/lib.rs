//! RocketShoes cart engine.
//!
//! Client-side shopping-cart state management for the RocketShoes
//! storefront UI: an in-memory cart collection, durable persistence of
//! every committed mutation, and stock validation against the remote
//! catalog/stock API before any quantity change is applied.
//!
//! # Architecture
//!
//! [`store::CartStore`] owns the cart and exposes the three mutation
//! operations. Everything external is behind a trait in [`ports`]:
//!
//! - [`api::CatalogApiClient`] - `reqwest` client for `products/{id}` and
//!   `stock/{id}`
//! - [`storage::JsonFileStorage`] / [`storage::MemoryStorage`] - durable
//!   blob storage (the localStorage analog)
//! - [`notify::TracingNotifier`] - user-facing failure messages
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use rocketshoes_cart::{
//!     api::CatalogApiClient, config::CartConfig, notify::TracingNotifier,
//!     storage::JsonFileStorage, store::CartStore,
//! };
//! use rocketshoes_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let api = Arc::new(CatalogApiClient::new(&config.api)?);
//! let mut store = CartStore::new(
//!     Box::new(JsonFileStorage::new(&config.storage_dir)),
//!     api.clone(),
//!     api,
//!     Arc::new(TracingNotifier::new()),
//! );
//!
//! store.add_product(ProductId::new(1)).await;
//! println!("{} items in cart", store.items().len());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod ports;
pub mod storage;
pub mod store;
pub mod types;

pub use error::CartError;
pub use store::{CART_STORAGE_KEY, CartStore};
pub use types::{Cart, CartItem, Product, StockLevel};
