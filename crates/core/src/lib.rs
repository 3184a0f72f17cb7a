//! RocketShoes Core - Shared types library.
//!
//! This crate provides common types used across the RocketShoes components:
//! - `cart` - Cart state engine (stock-validated mutations, persistence)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
