//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter. The filter comes from
//! `RUST_LOG` when set, otherwise from `[logging] filter` in the config file.
//!
//! ```bash
//! # Gateway traffic and controller state changes
//! RUST_LOG=info cargo run
//!
//! # Payloads of every request (doctor passwords are redacted)
//! RUST_LOG=debug cargo run
//!
//! # Only the gateway crate
//! RUST_LOG=record_gateway=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` an update looks like:
//!
//! ```text
//! INFO update_product:get_by_key{key=ProductId(1) collection="Products"}: Get key=product_1
//! INFO update_product:update_product{id=ProductId(1) ...}: Updated key=product_1
//! INFO update_product: Product updated product_id=product_1
//! INFO update_product:refresh: Product list refreshed size=3
//! ```
use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

pub fn setup_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    // A second call (e.g. from tests) leaves the first subscriber in place
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .compact()
        .try_init();
}
