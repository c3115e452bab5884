//! HTTP client for the vitrine catalog API.
//!
//! Wraps the four catalog endpoints behind typed calls and implements
//! [`CatalogSource`] so a `ScrollSession` can page against a live
//! server the same way it pages against an in-process catalog.

use std::time::Duration;

use thiserror::Error;
use url::Url;
use uuid::Uuid;

use vitrine_catalog::Product;
use vitrine_core::{CatalogQuery, CatalogSource, Page, SourceError};

/// Failure of one catalog API call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL: {url}")]
    InvalidUrl { url: String },
    #[error("request failed: {message}")]
    Request { message: String },
    #[error("catalog returned status {code}")]
    Status { code: u16 },
    #[error("malformed response: {message}")]
    Decode { message: String },
}

impl From<ClientError> for SourceError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Status { code } => SourceError::Status { code },
            ClientError::Decode { message } => SourceError::Decode { message },
            other => SourceError::Network {
                message: other.to_string(),
            },
        }
    }
}

/// Typed client for the catalog HTTP API.
pub struct CatalogClient {
    base_url: Url,
    client: reqwest::Client,
}

impl CatalogClient {
    /// Client against a base URL such as `http://localhost:3000/`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        // A trailing slash matters for Url::join.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|_| ClientError::InvalidUrl {
            url: base_url.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("vitrine/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url.join(path).map_err(|_| ClientError::InvalidUrl {
            url: format!("{}{}", self.base_url, path),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| ClientError::Request {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                code: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| ClientError::Decode {
            message: e.to_string(),
        })
    }

    /// One page of the filtered, sorted product listing.
    pub async fn fetch_products(&self, query: &CatalogQuery) -> Result<Page<Product>, ClientError> {
        let url = self.endpoint("products")?;
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ClientError::Request {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                code: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| ClientError::Decode {
            message: e.to_string(),
        })
    }

    /// Single product by id.
    pub async fn fetch_product(&self, id: Uuid) -> Result<Product, ClientError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        self.get_json(url, &[]).await
    }

    /// Distinct categories.
    pub async fn fetch_categories(&self) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint("categories")?;
        self.get_json(url, &[]).await
    }

    /// Distinct subcategories, optionally for one category.
    pub async fn fetch_subcategories(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint("subcategories")?;
        let params: Vec<(&str, String)> = category
            .map(|c| vec![("category", c.to_string())])
            .unwrap_or_default();
        self.get_json(url, &params).await
    }
}

impl CatalogSource for CatalogClient {
    type Item = Product;

    async fn fetch_page(&self, query: &CatalogQuery) -> Result<Page<Product>, SourceError> {
        self.fetch_products(query).await.map_err(|error| {
            tracing::debug!(%error, offset = query.offset, "catalog fetch failed");
            error.into()
        })
    }
}
