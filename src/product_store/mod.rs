//! # Products Collection
//!
//! The `Products` table of the data service, hosted as a
//! [`Collection`](record_gateway::Collection) of [`Product`] rows.
//!
//! ## Structure
//!
//! - [`entity`] - [`Record`](record_gateway::Record) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type shared by the collection and its client
//! - [`new()`] - Factory function that creates the collection and its client
//!
//! ## Usage
//!
//! ```rust
//! use admin_panel::product_store;
//! use admin_panel::model::ProductInsert;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (collection, client) = product_store::new(32);
//!     tokio::spawn(collection.run());
//!
//!     let product = client
//!         .insert_product(ProductInsert {
//!             name: "Gauze".to_string(),
//!             price: Decimal::new(5, 0),
//!             description: "sterile".to_string(),
//!             quantity: 10,
//!             product_image: "http://x/img.png".to_string(),
//!         })
//!         .await?;
//!     assert_eq!(product.id.to_string(), "product_1");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use record_gateway::Collection;

/// Creates a new Products collection and its client.
pub fn new(buffer_size: usize) -> (Collection<Product>, ProductClient) {
    let (collection, generic_client) = Collection::new(buffer_size);
    (collection, ProductClient::new(generic_client))
}
