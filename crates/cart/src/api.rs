//! REST client for the storefront catalog and stock endpoints.
//!
//! The API is the json-server style storefront backend:
//! - `GET products/{id}` -> product metadata
//! - `GET stock/{id}` -> available quantity
//!
//! One client implements both [`ProductCatalog`] and [`StockOracle`], so a
//! single instance can be handed to the cart store for both lookups.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use rocketshoes_core::ProductId;

use crate::config::ApiConfig;
use crate::ports::{ProductCatalog, StockOracle};
use crate::types::{Product, StockLevel};

/// Errors that can occur when calling the catalog/stock API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connect, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request path did not join onto the base URL.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// Response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API answered 404 for this resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API answered a non-success status other than 404.
    #[error("unexpected status code: {0}")]
    Status(u16),
}

/// Client for the catalog/stock REST API.
///
/// Cheaply cloneable; the HTTP connection pool is shared behind an `Arc`.
#[derive(Clone)]
pub struct CatalogApiClient {
    inner: Arc<CatalogApiClientInner>,
}

struct CatalogApiClientInner {
    client: reqwest::Client,
    base_url: url::Url,
}

impl CatalogApiClient {
    /// Create a new API client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogApiClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// `GET` a JSON resource relative to the base URL.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.inner.base_url.join(path)?;
        debug!(%url, "catalog API request");

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_owned()));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "catalog API returned non-success status"
            );
            return Err(ApiError::Status(status.as_u16()));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ProductCatalog for CatalogApiClient {
    #[instrument(skip(self))]
    async fn product(&self, product_id: ProductId) -> Result<Product, ApiError> {
        self.get_json(&format!("products/{product_id}")).await
    }
}

#[async_trait]
impl StockOracle for CatalogApiClient {
    #[instrument(skip(self))]
    async fn stock(&self, product_id: ProductId) -> Result<StockLevel, ApiError> {
        self.get_json(&format!("stock/{product_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_client_builds_from_config() {
        let config = ApiConfig {
            base_url: url::Url::parse("http://localhost:3333/").unwrap(),
            timeout: Duration::from_secs(5),
        };
        assert!(CatalogApiClient::new(&config).is_ok());
    }

    #[test]
    fn test_resource_paths_join_below_base_url() {
        let base = url::Url::parse("http://localhost:3333/").unwrap();
        let id = ProductId::new(2);
        assert_eq!(
            base.join(&format!("products/{id}")).unwrap().as_str(),
            "http://localhost:3333/products/2"
        );
        assert_eq!(
            base.join(&format!("stock/{id}")).unwrap().as_str(),
            "http://localhost:3333/stock/2"
        );
    }
}
