//! # Dashboard
//!
//! The admin panel's synchronization controller. [`Dashboard`] owns the cached product list,
//! both form buffers, the edit session, the view selector and the feedback line, and routes
//! every mutation through the gateway clients.
//!
//! ## Operation flow
//!
//! Every mutating operation follows the same shape:
//!
//! 1. Claim the action's in-flight flag. A second trigger of the same action while the first
//!    is outstanding returns [`Dispatch::Busy`] and touches nothing.
//! 2. Snapshot the relevant buffer and release the state lock.
//! 3. Await the gateway.
//! 4. On success reset the buffer, re-fetch the product list, then write the feedback.
//!    On failure write an error feedback and leave the buffer alone.
//!
//! The state lock is never held across an `.await`, so different actions may be in flight
//! at the same time. The feedback line always holds the result of whichever operation
//! finished last.

pub mod controller;
pub mod feedback;
pub mod session;

pub use controller::*;
pub use feedback::*;
pub use session::*;

/// The mutating actions, each guarded by its own in-flight flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    AddDoctor,
    AddProduct,
    UpdateProduct,
    DeleteProduct,
}

/// Outcome of triggering a mutating action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The operation ran to completion and wrote this feedback.
    Completed(Feedback),
    /// The same action was already in flight. Nothing was sent and the feedback is unchanged.
    Busy(Action),
}

impl Dispatch {
    /// The feedback written by a completed operation.
    pub fn feedback(&self) -> Option<&Feedback> {
        match self {
            Dispatch::Completed(feedback) => Some(feedback),
            Dispatch::Busy(_) => None,
        }
    }
}
