//! # Gateway Client
//!
//! The sending half of a [`Collection`](crate::Collection).

use crate::error::GatewayError;
use crate::message::GatewayRequest;
use crate::record::Record;
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle for issuing requests to one collection.
///
/// Holds only a channel sender, so cloning is cheap and clones can be shared across tasks.
/// Every method suspends until the collection answers and returns a `Result<…, GatewayError>`.
#[derive(Clone)]
pub struct GatewayClient<T: Record> {
    sender: mpsc::Sender<GatewayRequest<T>>,
}

impl<T: Record> GatewayClient<T> {
    pub fn new(sender: mpsc::Sender<GatewayRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn list_all(&self) -> Result<Vec<T>, GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.send(GatewayRequest::ListAll { respond_to }).await?;
        response.await.map_err(|_| GatewayError::Dropped)?
    }

    pub async fn insert(&self, params: T::Insert) -> Result<T, GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.send(GatewayRequest::Insert { params, respond_to }).await?;
        response.await.map_err(|_| GatewayError::Dropped)?
    }

    pub async fn get_by_key(&self, key: T::Key) -> Result<Option<T>, GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.send(GatewayRequest::GetByKey { key, respond_to }).await?;
        response.await.map_err(|_| GatewayError::Dropped)?
    }

    /// Update the row stored under `key`. `Ok(None)` means no row matched.
    pub async fn update_by_key(
        &self,
        key: T::Key,
        patch: T::Patch,
    ) -> Result<Option<T>, GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.send(GatewayRequest::UpdateByKey {
            key,
            patch,
            respond_to,
        })
        .await?;
        response.await.map_err(|_| GatewayError::Dropped)?
    }

    /// Delete the row stored under `key`, returning how many rows were removed.
    pub async fn delete_by_key(&self, key: T::Key) -> Result<u64, GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.send(GatewayRequest::DeleteByKey { key, respond_to }).await?;
        response.await.map_err(|_| GatewayError::Dropped)?
    }

    async fn send(&self, request: GatewayRequest<T>) -> Result<(), GatewayError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| GatewayError::Closed)
    }
}
