//! # Record Gateway
//!
//! An asynchronous request/response data service for named record collections.
//! Each collection is a Tokio task owning its rows; callers talk to it through a cloneable
//! [`GatewayClient`] and never touch the rows directly.
//!
//! ## Operations
//!
//! | Operation | Success result | Notes |
//! |---|---|---|
//! | `list_all` | every record, in insertion order | |
//! | `insert` | the stored record with its assigned key | keys come from the collection |
//! | `get_by_key` | `Some(record)` or `None` | |
//! | `update_by_key` | `Some(updated)` or `None` | conditional: `None` when no row matched |
//! | `delete_by_key` | removed count | a missing key removes 0 rows |
//!
//! Every failure is a [`GatewayError`] whose text is meant to be shown as-is.
//!
//! ## Layers
//!
//! 1. **Record Layer** ([`Record`]): the row type, its payloads and its own constraints
//! 2. **Server Layer** ([`Collection`]): sequential request processing over an ordered store
//! 3. **Interface Layer** ([`GatewayClient`], [`CollectionClient`]): typed async calls
//!
//! ## Consistency
//!
//! Requests to one collection are processed strictly one at a time. Two calls issued by a
//! caller are therefore never interleaved inside the collection, but nothing ties two calls
//! together either: a `get_by_key` followed by `update_by_key` is two round trips. The
//! conditional update exists so that the second call can report a row that vanished in
//! between instead of silently succeeding.
//!
//! ## Testing
//!
//! See the [`mock`] module for [`MockGateway`](mock::MockGateway) and the hand-answered
//! channel helpers.

pub mod client;
pub mod client_trait;
pub mod collection;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;

// Re-export core types for convenience
pub use client::GatewayClient;
pub use client_trait::CollectionClient;
pub use collection::Collection;
pub use error::GatewayError;
pub use message::{GatewayRequest, Response};
pub use record::Record;
