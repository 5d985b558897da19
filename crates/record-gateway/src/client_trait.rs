//! # CollectionClient Trait
//!
//! Common interface for collection-specific clients. Implementors supply the inner
//! [`GatewayClient`] and an error mapping, and get `list_all`, `get_by_key` and
//! `delete_by_key` for free.
use crate::{GatewayClient, GatewayError, Record};
use async_trait::async_trait;

/// Trait for collection-specific clients to inherit the read and delete operations.
///
/// Inserts and updates usually need payload conversion, so those stay on the concrete client.
///
/// # Example
///
/// ```rust
/// use record_gateway::{CollectionClient, GatewayClient, GatewayError, Record};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { key: u32 }
/// #[derive(Debug)] struct NoteInsert;
/// #[derive(Debug)] struct NotePatch;
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct NoteError(String);
///
/// #[async_trait]
/// impl Record for Note {
///     const COLLECTION: &'static str = "Notes";
///     type Key = u32;
///     type Insert = NoteInsert;
///     type Patch = NotePatch;
///     type Error = NoteError;
///     fn from_insert(key: u32, _: NoteInsert) -> Result<Self, NoteError> { Ok(Self { key }) }
///     async fn on_update(&mut self, _: NotePatch) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// struct NoteClient { inner: GatewayClient<Note> }
///
/// #[async_trait]
/// impl CollectionClient<Note> for NoteClient {
///     type Error = NoteError;
///
///     fn inner(&self) -> &GatewayClient<Note> {
///         &self.inner
///     }
///
///     fn map_error(e: GatewayError) -> NoteError {
///         NoteError(e.to_string())
///     }
/// }
///
/// async fn usage(client: NoteClient) {
///     // list_all(), get_by_key() and delete_by_key() are provided automatically
///     let _ = client.list_all().await;
///     let _ = client.get_by_key(1).await;
///     let _ = client.delete_by_key(1).await;
/// }
/// ```
#[async_trait]
pub trait CollectionClient<T: Record>: Send + Sync {
    /// The collection-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &GatewayClient<T>;

    /// Map gateway errors to the collection-specific error type.
    fn map_error(e: GatewayError) -> Self::Error;

    /// Fetch every record in gateway order.
    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn list_all(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list_all().await.map_err(Self::map_error)
    }

    /// Fetch a record by key.
    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn get_by_key(&self, key: T::Key) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get_by_key(key).await.map_err(Self::map_error)
    }

    /// Delete a record by key, returning the removed count.
    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn delete_by_key(&self, key: T::Key) -> Result<u64, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete_by_key(key).await.map_err(Self::map_error)
    }
}
