//! # Collection Server
//!
//! This module defines [`Collection`], the server half of the gateway. It owns the rows of a
//! single collection and processes requests one at a time, so the store needs no locking.

use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::message::GatewayRequest;
use crate::record::Record;
use indexmap::IndexMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A named collection of records reachable over an async request/response channel.
///
/// **Concurrency Model**: each collection runs in its own Tokio task and handles its
/// messages sequentially. Clients only ever hold the sending half of the channel.
///
/// # Usage Pattern
///
/// 1.  **Create**: `Collection::new()` returns the server and a [`GatewayClient`].
/// 2.  **Run**: spawn `collection.run()` in a background task.
/// 3.  **Shutdown**: drop every client; `run()` returns once the channel closes.
///
/// ```rust
/// use record_gateway::{Collection, Record};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { key: u32, text: String }
/// #[derive(Debug)] struct NoteInsert { text: String }
/// #[derive(Debug)] struct NotePatch { text: String }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl Record for Note {
///     const COLLECTION: &'static str = "Notes";
///     type Key = u32;
///     type Insert = NoteInsert;
///     type Patch = NotePatch;
///     type Error = NoteError;
///
///     fn from_insert(key: u32, params: NoteInsert) -> Result<Self, NoteError> {
///         Ok(Self { key, text: params.text })
///     }
///     async fn on_update(&mut self, patch: NotePatch) -> Result<(), NoteError> {
///         self.text = patch.text;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (collection, client) = Collection::<Note>::new(10);
///     tokio::spawn(collection.run());
///
///     let note = client.insert(NoteInsert { text: "hello".into() }).await.unwrap();
///     assert_eq!(note.key, 1);
///     assert_eq!(client.list_all().await.unwrap().len(), 1);
/// }
/// ```
///
/// # Operations
///
/// * **ListAll**: clones every row in insertion order.
/// * **Insert**: takes the next key from the counter, builds the row with `from_insert`,
///   runs `on_insert`, then stores it. A failed hook leaves the store unchanged (the key is
///   still consumed, like a database sequence).
/// * **GetByKey**: clone of the row, or `None`.
/// * **UpdateByKey**: applies `on_update` to a copy and swaps it in only on success.
///   A missing key answers `Ok(None)`.
/// * **DeleteByKey**: runs `on_delete`, removes the row and answers the removed count.
///   A missing key answers `Ok(0)`.
pub struct Collection<T: Record> {
    receiver: mpsc::Receiver<GatewayRequest<T>>,
    store: IndexMap<T::Key, T>,
    next_key: u32,
}

impl<T: Record> Collection<T> {
    /// Creates a new `Collection` and its associated `GatewayClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client calls
    /// wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, GatewayClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let collection = Self {
            receiver,
            store: IndexMap::new(),
            next_key: 1,
        };
        (collection, GatewayClient::new(sender))
    }

    /// Runs the request loop until every client has been dropped.
    pub async fn run(mut self) {
        let collection = T::COLLECTION;
        info!(collection, "Collection started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                GatewayRequest::ListAll { respond_to } => {
                    let rows: Vec<T> = self.store.values().cloned().collect();
                    debug!(collection, count = rows.len(), "ListAll");
                    let _ = respond_to.send(Ok(rows));
                }
                GatewayRequest::Insert { params, respond_to } => {
                    debug!(collection, ?params, "Insert");
                    let _ = respond_to.send(self.insert(params).await);
                }
                GatewayRequest::GetByKey { key, respond_to } => {
                    let row = self.store.get(&key).cloned();
                    debug!(collection, %key, found = row.is_some(), "GetByKey");
                    let _ = respond_to.send(Ok(row));
                }
                GatewayRequest::UpdateByKey {
                    key,
                    patch,
                    respond_to,
                } => {
                    debug!(collection, %key, ?patch, "UpdateByKey");
                    let _ = respond_to.send(self.update(key, patch).await);
                }
                GatewayRequest::DeleteByKey { key, respond_to } => {
                    debug!(collection, %key, "DeleteByKey");
                    let _ = respond_to.send(self.delete(key).await);
                }
            }
        }

        info!(collection, size = self.store.len(), "Shutdown");
    }

    async fn insert(&mut self, params: T::Insert) -> Result<T, GatewayError> {
        let collection = T::COLLECTION;
        let key = T::Key::from(self.next_key);
        self.next_key += 1;

        let mut row = T::from_insert(key.clone(), params).map_err(|e| {
            warn!(collection, error = %e, "Insert rejected");
            GatewayError::Rejected(Box::new(e))
        })?;
        if let Err(e) = row.on_insert().await {
            warn!(collection, %key, error = %e, "on_insert failed");
            return Err(GatewayError::Rejected(Box::new(e)));
        }
        self.store.insert(key.clone(), row.clone());
        info!(collection, %key, size = self.store.len(), "Inserted");
        Ok(row)
    }

    async fn update(&mut self, key: T::Key, patch: T::Patch) -> Result<Option<T>, GatewayError> {
        let collection = T::COLLECTION;
        let Some(current) = self.store.get(&key) else {
            warn!(collection, %key, "No row matched");
            return Ok(None);
        };

        let mut next = current.clone();
        if let Err(e) = next.on_update(patch).await {
            warn!(collection, %key, error = %e, "Update rejected");
            return Err(GatewayError::Rejected(Box::new(e)));
        }
        self.store.insert(key.clone(), next.clone());
        info!(collection, %key, "Updated");
        Ok(Some(next))
    }

    async fn delete(&mut self, key: T::Key) -> Result<u64, GatewayError> {
        let collection = T::COLLECTION;
        let Some(row) = self.store.get(&key) else {
            warn!(collection, %key, "No row matched");
            return Ok(0);
        };

        if let Err(e) = row.on_delete().await {
            warn!(collection, %key, error = %e, "on_delete failed");
            return Err(GatewayError::Rejected(Box::new(e)));
        }
        self.store.shift_remove(&key);
        info!(collection, %key, size = self.store.len(), "Deleted");
        Ok(1)
    }
}
