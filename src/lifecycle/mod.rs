//! # System Lifecycle
//!
//! Starting, wiring and stopping the panel.
//!
//! [`DashboardSystem`] spawns one [`Collection`](record_gateway::Collection) task per table,
//! seeds the configured products, hands the clients to a [`Dashboard`](crate::dashboard::Dashboard)
//! and performs the initial list fetch.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the dashboard** - this drops the last clients and closes both channels
//! 2. **Collections detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - wait for both collection tasks to finish
//!
//! ## Observability
//!
//! [`setup_tracing`] initializes structured logging once per process.

pub mod dashboard_system;
pub mod tracing;

pub use dashboard_system::*;
pub use self::tracing::*;
