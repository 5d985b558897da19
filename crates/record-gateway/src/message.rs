//! # Gateway Messages
//!
//! The request enum sent from a [`GatewayClient`](crate::GatewayClient) to a
//! [`Collection`](crate::Collection), one variant per gateway operation.

use crate::error::GatewayError;
use crate::record::Record;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by collections.
pub type Response<T> = oneshot::Sender<Result<T, GatewayError>>;

/// Request sent to a collection.
///
/// The variants map to the five operations of the data service:
///
/// - **ListAll**: every record, in insertion order.
/// - **Insert**: store a new record; the response carries it with its assigned key.
/// - **GetByKey**: a single record, or `None`.
/// - **UpdateByKey**: conditional update. `None` means no row matched the key, which is
///   reported as a value rather than an error so callers can tell it apart from failures.
/// - **DeleteByKey**: number of rows removed (0 or 1).
#[derive(Debug)]
pub enum GatewayRequest<T: Record> {
    ListAll {
        respond_to: Response<Vec<T>>,
    },
    Insert {
        params: T::Insert,
        respond_to: Response<T>,
    },
    GetByKey {
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
    UpdateByKey {
        key: T::Key,
        patch: T::Patch,
        respond_to: Response<Option<T>>,
    },
    DeleteByKey {
        key: T::Key,
        respond_to: Response<u64>,
    },
}
