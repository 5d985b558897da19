//! Typed wrappers around [`GatewayClient`](record_gateway::GatewayClient), one per collection.

pub mod doctor_client;
pub mod product_client;

pub use doctor_client::*;
pub use product_client::*;
