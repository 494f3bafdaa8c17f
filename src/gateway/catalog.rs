//! Catalog lookups: shop profile, categories and products.

use super::endpoint;
use crate::model::{Category, Shop, ShopId};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("shop {0} not found")]
    NotFound(ShopId),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog service returned status {0}")]
    Status(u16),
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_shop(&self, id: ShopId) -> Result<Shop, CatalogError>;
    async fn fetch_categories(&self, id: ShopId) -> Result<Vec<Category>, CatalogError>;
}

#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    http: Client,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        Ok(Self {
            base_url: base_url.into(),
            http: Client::builder().timeout(timeout).build()?,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        id: ShopId,
        path: &str,
    ) -> Result<T, CatalogError> {
        let response = self.http.get(endpoint(&self.base_url, path)).send().await?;
        check_status(id, response.status())?;
        Ok(response.json().await?)
    }
}

/// A missing shop is `NotFound`; any other non-2xx status is passed through.
fn check_status(id: ShopId, status: StatusCode) -> Result<(), CatalogError> {
    match status {
        StatusCode::NOT_FOUND => Err(CatalogError::NotFound(id)),
        status if !status.is_success() => Err(CatalogError::Status(status.as_u16())),
        _ => Ok(()),
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    #[instrument(skip(self))]
    async fn fetch_shop(&self, id: ShopId) -> Result<Shop, CatalogError> {
        let shop: Shop = self.get_json(id, &format!("shops/{id}")).await?;
        debug!(
            name = %shop.name,
            products = shop.products.len(),
            "Shop fetched"
        );
        Ok(shop)
    }

    #[instrument(skip(self))]
    async fn fetch_categories(&self, id: ShopId) -> Result<Vec<Category>, CatalogError> {
        self.get_json(id, &format!("shops/{id}/categories")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(check_status(ShopId(3), StatusCode::OK).is_ok());
        assert!(matches!(
            check_status(ShopId(3), StatusCode::NOT_FOUND),
            Err(CatalogError::NotFound(ShopId(3)))
        ));
        assert!(matches!(
            check_status(ShopId(3), StatusCode::INTERNAL_SERVER_ERROR),
            Err(CatalogError::Status(500))
        ));
        assert!(matches!(
            check_status(ShopId(3), StatusCode::FORBIDDEN),
            Err(CatalogError::Status(403))
        ));
    }
}
