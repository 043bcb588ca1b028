//! # HTTP Catalog
//!
//! Stock and product lookups against the storefront API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET {base_url}/stock/{id}     → { "id": 1, "amount": 3 }               │
//! │  GET {base_url}/products/{id}  → { "id": 1, "title": "…",               │
//! │                                    "price": 179.9, "image": "…" }       │
//! │                                                                         │
//! │  Status mapping                                                         │
//! │  ──────────────                                                         │
//! │  2xx + valid body   → Ok(record)                                        │
//! │  2xx + bad body     → ServiceError::InvalidResponse                     │
//! │  404                → ServiceError::NotFound                            │
//! │  other / transport  → ServiceError::Unavailable                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries. A failed lookup fails the cart operation that made it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rocketshoes_core::{Product, ProductId, Stock};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::config::ApiSettings;
use crate::services::{ProductService, ServiceError, ServiceResult, StockService};

const STOCK_RESOURCE: &str = "stock";
const PRODUCTS_RESOURCE: &str = "products";

/// HTTP client for the stock/product API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Creates a catalog client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ServiceError::Unavailable(format!("invalid base URL: {}", e)))?;

        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;

        Ok(HttpCatalog { client, base_url })
    }

    /// Creates a catalog client from the `[api]` config section.
    pub fn from_settings(settings: &ApiSettings) -> ServiceResult<Self> {
        Self::new(&settings.base_url, settings.timeout())
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, resource: &str, product_id: ProductId) -> ServiceResult<Url> {
        self.base_url
            .join(&format!("{}/{}", resource, product_id))
            .map_err(|e| ServiceError::Unavailable(e.to_string()))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        product_id: ProductId,
    ) -> ServiceResult<T> {
        let url = self.endpoint(resource, product_id)?;
        debug!(%url, "Catalog request");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            error!(%url, error = %e, "Catalog request failed");
            ServiceError::Unavailable(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound {
                resource,
                product_id,
            });
        }

        if !status.is_success() {
            error!(%url, status = %status, "Catalog returned an error status");
            return Err(ServiceError::Unavailable(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            error!(%url, error = %e, "Failed to decode catalog response");
            ServiceError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait]
impl StockService for HttpCatalog {
    async fn get_stock(&self, product_id: ProductId) -> ServiceResult<Stock> {
        self.fetch(STOCK_RESOURCE, product_id).await
    }
}

#[async_trait]
impl ProductService for HttpCatalog {
    async fn get_product(&self, product_id: ProductId) -> ServiceResult<Product> {
        self.fetch(PRODUCTS_RESOURCE, product_id).await
    }
}
