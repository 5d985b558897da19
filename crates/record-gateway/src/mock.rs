//! # Mock Gateway & Testing Guide
//!
//! [`MockGateway<T>`] hands out a real [`GatewayClient<T>`] whose requests are answered from a
//! queue of scripted expectations instead of a running [`Collection`](crate::Collection). Code
//! under test cannot tell the difference, which makes failure paths trivial to reach.
//!
//! ## When to use Mocks vs Real Collections
//!
//! | Feature | MockGateway | Raw channel | Real Collection |
//! |---------|-------------|-------------|-----------------|
//! | **State** | None (scripted) | None (hand answered) | Real rows |
//! | **Error Injection** | `return_err` | send any `Err` | Only via record validation |
//! | **Timing control** | Answers immediately | Test decides when to answer | Answers immediately |
//! | **Use Case** | Failure paths, call assertions | Interleaving of slow and fast calls | End-to-end flows |
//!
//! ## Scripted Expectations
//!
//! ```rust
//! use record_gateway::mock::MockGateway;
//! use record_gateway::{GatewayError, Record};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Note { key: u32 }
//! #[derive(Debug)] struct NoteInsert;
//! #[derive(Debug)] struct NotePatch;
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl Record for Note {
//!     const COLLECTION: &'static str = "Notes";
//!     type Key = u32; type Insert = NoteInsert; type Patch = NotePatch; type Error = NoteError;
//!     fn from_insert(key: u32, _: NoteInsert) -> Result<Self, NoteError> { Ok(Self { key }) }
//!     async fn on_update(&mut self, _: NotePatch) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockGateway::<Note>::new();
//!     mock.expect_get_by_key(1).return_ok(Some(Note { key: 1 }));
//!     mock.expect_update_by_key(1)
//!         .return_err(GatewayError::Unavailable("timeout".into()));
//!
//!     let client = mock.client();
//!     assert_eq!(client.get_by_key(1).await.unwrap(), Some(Note { key: 1 }));
//!     assert!(client.update_by_key(1, NotePatch).await.is_err());
//!
//!     assert_eq!(mock.calls(), vec!["get_by_key", "update_by_key"]);
//!     mock.verify();
//! }
//! ```
//!
//! ## Hand-Answered Requests
//!
//! [`create_mock_client`] returns a client plus the receiving end of its channel. The test
//! pulls requests with the `expect_*` helpers and answers whenever it likes, which is how
//! overlapping operations are driven deterministically.

use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::message::{GatewayRequest, Response};
use crate::record::Record;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer for one request.
enum Expectation<T: Record> {
    ListAll(Result<Vec<T>, GatewayError>),
    Insert(Result<T, GatewayError>),
    GetByKey(T::Key, Result<Option<T>, GatewayError>),
    UpdateByKey(T::Key, Result<Option<T>, GatewayError>),
    DeleteByKey(T::Key, Result<u64, GatewayError>),
}

impl<T: Record> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::ListAll(_) => "list_all",
            Expectation::Insert(_) => "insert",
            Expectation::GetByKey(..) => "get_by_key",
            Expectation::UpdateByKey(..) => "update_by_key",
            Expectation::DeleteByKey(..) => "delete_by_key",
        }
    }
}

fn request_name<T: Record>(request: &GatewayRequest<T>) -> &'static str {
    match request {
        GatewayRequest::ListAll { .. } => "list_all",
        GatewayRequest::Insert { .. } => "insert",
        GatewayRequest::GetByKey { .. } => "get_by_key",
        GatewayRequest::UpdateByKey { .. } => "update_by_key",
        GatewayRequest::DeleteByKey { .. } => "delete_by_key",
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Script<T: Record> {
    expectations: VecDeque<Expectation<T>>,
    calls: Vec<&'static str>,
    mismatches: Vec<String>,
}

/// A mock gateway answering requests from scripted expectations, in order.
///
/// A request that does not match the next expectation (wrong operation or wrong key) is
/// recorded as a mismatch and its response channel is dropped, so the caller sees
/// [`GatewayError::Dropped`]. [`MockGateway::verify`] fails on any mismatch or leftover
/// expectation.
pub struct MockGateway<T: Record> {
    client: GatewayClient<T>,
    script: Arc<Mutex<Script<T>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> Default for MockGateway<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MockGateway<T> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<GatewayRequest<T>>(100);
        let script = Arc::new(Mutex::new(Script {
            expectations: VecDeque::new(),
            calls: Vec::new(),
            mismatches: Vec::new(),
        }));
        let script_clone = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut script = lock(&script_clone);
                script.calls.push(request_name(&request));
                let expectation = script.expectations.pop_front();

                match (request, expectation) {
                    (GatewayRequest::ListAll { respond_to }, Some(Expectation::ListAll(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        GatewayRequest::Insert { respond_to, .. },
                        Some(Expectation::Insert(r)),
                    ) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        GatewayRequest::GetByKey { key, respond_to },
                        Some(Expectation::GetByKey(expected, r)),
                    ) if key == expected => {
                        let _ = respond_to.send(r);
                    }
                    (
                        GatewayRequest::UpdateByKey {
                            key, respond_to, ..
                        },
                        Some(Expectation::UpdateByKey(expected, r)),
                    ) if key == expected => {
                        let _ = respond_to.send(r);
                    }
                    (
                        GatewayRequest::DeleteByKey { key, respond_to },
                        Some(Expectation::DeleteByKey(expected, r)),
                    ) if key == expected => {
                        let _ = respond_to.send(r);
                    }
                    (request, expectation) => {
                        let expected = expectation.as_ref().map_or("nothing", |e| e.name());
                        script.mismatches.push(format!(
                            "unexpected {} request (expected {expected})",
                            request_name(&request)
                        ));
                    }
                }
            }
        });

        Self {
            client: GatewayClient::new(sender),
            script,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> GatewayClient<T> {
        self.client.clone()
    }

    /// Operation names of every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<&'static str> {
        lock(&self.script).calls.clone()
    }

    pub fn expect_list_all(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder::<Vec<T>>(Box::new(Expectation::ListAll))
    }

    pub fn expect_insert(&mut self) -> ExpectationBuilder<T, T> {
        self.builder::<T>(Box::new(Expectation::Insert))
    }

    pub fn expect_get_by_key(&mut self, key: T::Key) -> ExpectationBuilder<T, Option<T>> {
        self.builder::<Option<T>>(Box::new(move |r| Expectation::GetByKey(key, r)))
    }

    pub fn expect_update_by_key(&mut self, key: T::Key) -> ExpectationBuilder<T, Option<T>> {
        self.builder::<Option<T>>(Box::new(move |r| Expectation::UpdateByKey(key, r)))
    }

    pub fn expect_delete_by_key(&mut self, key: T::Key) -> ExpectationBuilder<T, u64> {
        self.builder::<u64>(Box::new(move |r| Expectation::DeleteByKey(key, r)))
    }

    /// Verifies that all expectations were met and no unexpected request arrived.
    pub fn verify(&self) {
        let script = lock(&self.script);
        if !script.mismatches.is_empty() {
            panic!("Mock gateway mismatches: {:?}", script.mismatches);
        }
        if !script.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                script.expectations.len()
            );
        }
    }

    fn builder<R>(&self, wrap: Wrap<T, R>) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            script: self.script.clone(),
            wrap,
        }
    }
}

type Wrap<T, R> = Box<dyn FnOnce(Result<R, GatewayError>) -> Expectation<T> + Send>;

/// Builder returned by the `expect_*` methods of [`MockGateway`].
pub struct ExpectationBuilder<T: Record, R> {
    script: Arc<Mutex<Script<T>>>,
    wrap: Wrap<T, R>,
}

impl<T: Record, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: GatewayError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, GatewayError>) {
        let expectation = (self.wrap)(response);
        lock(&self.script).expectations.push_back(expectation);
    }
}

// =============================================================================
// HAND-ANSWERED REQUESTS
// =============================================================================

/// Creates a client and the receiving end of its channel.
///
/// Nothing answers the requests until the test does, so a call stays suspended for as long
/// as the test holds on to its responder.
pub fn create_mock_client<T: Record>(
    buffer_size: usize,
) -> (GatewayClient<T>, mpsc::Receiver<GatewayRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (GatewayClient::new(sender), receiver)
}

/// Waits for the next request and returns its responder if it is a ListAll.
pub async fn expect_list_all<T: Record>(
    receiver: &mut mpsc::Receiver<GatewayRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(GatewayRequest::ListAll { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is an Insert.
pub async fn expect_insert<T: Record>(
    receiver: &mut mpsc::Receiver<GatewayRequest<T>>,
) -> Option<(T::Insert, Response<T>)> {
    match receiver.recv().await {
        Some(GatewayRequest::Insert { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a GetByKey.
pub async fn expect_get<T: Record>(
    receiver: &mut mpsc::Receiver<GatewayRequest<T>>,
) -> Option<(T::Key, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(GatewayRequest::GetByKey { key, respond_to }) => Some((key, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is an UpdateByKey.
pub async fn expect_update<T: Record>(
    receiver: &mut mpsc::Receiver<GatewayRequest<T>>,
) -> Option<(T::Key, T::Patch, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(GatewayRequest::UpdateByKey {
            key,
            patch,
            respond_to,
        }) => Some((key, patch, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a DeleteByKey.
pub async fn expect_delete<T: Record>(
    receiver: &mut mpsc::Receiver<GatewayRequest<T>>,
) -> Option<(T::Key, Response<u64>)> {
    match receiver.recv().await {
        Some(GatewayRequest::DeleteByKey { key, respond_to }) => Some((key, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        key: u32,
        text: String,
    }

    #[derive(Debug)]
    struct NoteInsert {
        text: String,
    }

    #[derive(Debug)]
    struct NotePatch;

    #[derive(Debug, thiserror::Error)]
    #[error("Note error")]
    struct NoteError;

    #[async_trait]
    impl Record for Note {
        const COLLECTION: &'static str = "Notes";
        type Key = u32;
        type Insert = NoteInsert;
        type Patch = NotePatch;
        type Error = NoteError;

        fn from_insert(key: u32, params: NoteInsert) -> Result<Self, Self::Error> {
            Ok(Self {
                key,
                text: params.text,
            })
        }

        async fn on_update(&mut self, _patch: NotePatch) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn note(key: u32, text: &str) -> Note {
        Note {
            key,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_hand_answered_insert() {
        let (client, mut receiver) = create_mock_client::<Note>(10);

        let insert_task = tokio::spawn(async move {
            client
                .insert(NoteInsert {
                    text: "hello".to_string(),
                })
                .await
        });

        let (params, responder) = expect_insert(&mut receiver)
            .await
            .expect("Expected Insert request");
        assert_eq!(params.text, "hello");
        responder.send(Ok(note(7, "hello"))).unwrap();

        let inserted = insert_task.await.unwrap().unwrap();
        assert_eq!(inserted.key, 7);
    }

    #[tokio::test]
    async fn test_scripted_expectations_in_order() {
        let mut mock = MockGateway::<Note>::new();
        mock.expect_insert().return_ok(note(1, "a"));
        mock.expect_list_all().return_ok(vec![note(1, "a")]);
        mock.expect_delete_by_key(1).return_ok(1);

        let client = mock.client();
        let inserted = client
            .insert(NoteInsert {
                text: "a".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(inserted, note(1, "a"));
        assert_eq!(client.list_all().await.unwrap(), vec![note(1, "a")]);
        assert_eq!(client.delete_by_key(1).await.unwrap(), 1);

        assert_eq!(mock.calls(), vec!["insert", "list_all", "delete_by_key"]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_is_dropped_and_recorded() {
        let mut mock = MockGateway::<Note>::new();
        mock.expect_get_by_key(1).return_ok(None);

        let client = mock.client();
        let result = client.get_by_key(2).await;
        assert!(matches!(result, Err(GatewayError::Dropped)));
        assert_eq!(mock.calls(), vec!["get_by_key"]);
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_leftover_expectations() {
        let mut mock = MockGateway::<Note>::new();
        mock.expect_list_all().return_ok(vec![]);
        mock.verify();
    }
}
