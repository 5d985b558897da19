//! # Product Client
//!
//! Provides a high‑level API for the `Products` collection.
//! It wraps a `GatewayClient<Product>` and maps gateway failures into [`ProductError`].
use crate::model::{Product, ProductId, ProductInsert, ProductPatch};
use crate::product_store::ProductError;
use async_trait::async_trait;
use record_gateway::{CollectionClient, GatewayClient, GatewayError};
use tracing::{debug, instrument};

/// Client for the Products collection.
#[derive(Clone)]
pub struct ProductClient {
    inner: GatewayClient<Product>,
}

impl ProductClient {
    pub fn new(inner: GatewayClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CollectionClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &GatewayClient<Product> {
        &self.inner
    }

    fn map_error(e: GatewayError) -> Self::Error {
        ProductError::Gateway(e.to_string())
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn insert_product(&self, params: ProductInsert) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.insert(params).await.map_err(Self::map_error)
    }

    /// Conditional update. `Ok(None)` means no row with `id` existed when the write ran.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        self.inner
            .update_by_key(id, patch)
            .await
            .map_err(Self::map_error)
    }
}
