//! # Admin Panel
//!
//! The synchronization controller behind an admin panel that manages `Products` and
//! `Doctors` held in a record service.
//!
//! The [`Dashboard`](dashboard::Dashboard) keeps an in-memory copy of the product list,
//! pushes every mutation through the gateway, re-fetches the list after each one and reports
//! the outcome on a single feedback line. Selecting a row loads it into the product form for
//! editing.
//!
//! ## Module Tour
//!
//! ### 1. The Controller ([`dashboard`])
//! - **Role**: Owns the cached list, both form buffers, the edit session, the view selector
//!   and the feedback line.
//! - **Key items**: [`Dashboard`](dashboard::Dashboard), [`Dispatch`](dashboard::Dispatch),
//!   [`Feedback`](dashboard::Feedback).
//!
//! ### 2. The Interface ([`clients`])
//! - **Role**: Wraps the generic `GatewayClient` in collection-specific clients with their own
//!   error types.
//! - **Key items**: [`ProductClient`](clients::ProductClient), [`DoctorClient`](clients::DoctorClient).
//!
//! ### 3. The Tables ([`product_store`], [`doctor_store`])
//! - **Role**: [`Record`](record_gateway::Record) implementations that validate rows the way
//!   the service's columns do.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: Spawns the collections, seeds them and shuts them down.
//! - **Key items**: [`DashboardSystem`](lifecycle::DashboardSystem),
//!   [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ### 5. Settings ([`config`])
//! - **Role**: TOML file plus environment overrides.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod config;
pub mod dashboard;
pub mod doctor_store;
pub mod lifecycle;
pub mod model;
pub mod product_store;
