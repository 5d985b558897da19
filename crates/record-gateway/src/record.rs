//! # Record Trait
//!
//! The `Record` trait is the contract every row type (Product, Doctor, …) implements so a
//! generic [`Collection`](crate::Collection) can store it. It names the key, insert payload,
//! patch payload and error types, and provides hooks (`on_insert`, `on_update`, `on_delete`)
//! where a record enforces its own constraints.
//!
//! # Provided Methods (Hooks)
//! - [`Record::on_insert`]
//! - [`Record::on_delete`]
//!
//! Both default to `Ok(())`. Only [`Record::on_update`] must be written by hand, because
//! only the record knows how to apply its patch.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any row type must implement to be stored in a [`Collection`](crate::Collection).
///
/// # Keys
/// Keys are assigned by the collection, never by the caller. The collection hands out
/// sequential `u32` values and converts them with `From<u32>`, so a record composed for
/// insertion has no way to carry one.
#[async_trait]
pub trait Record: Clone + Send + Sync + 'static {
    /// Name of the collection, used in logs (e.g. `"Products"`).
    const COLLECTION: &'static str;

    /// The unique identifier for this record.
    type Key: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32> + 'static;

    /// The record as composed by a caller, without a key.
    type Insert: Send + Sync + Debug + 'static;

    /// A partial record applied by `update_by_key`.
    type Patch: Send + Sync + Debug + 'static;

    /// The error a record raises when it refuses an operation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the stored record from its freshly assigned key and the insert payload.
    fn from_insert(key: Self::Key, params: Self::Insert) -> Result<Self, Self::Error>;

    /// Called after `from_insert`, before the record becomes visible.
    async fn on_insert(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a patch. On error the collection keeps the previous version of the record.
    async fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;

    /// Called immediately before the record is removed.
    async fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}
