use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Products, assigned by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// Represents a product row in the `Products` collection.
///
/// # Record Gateway
/// This struct implements the [`Record`](record_gateway::Record) trait,
/// allowing it to be stored in a [`Collection`](record_gateway::Collection).
///
/// See [`impl Record for Product`](#impl-Record-for-Product) for details on:
/// - Insert payload ([`ProductInsert`])
/// - Update payload ([`ProductPatch`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub quantity: u32,
    pub product_image: String,
}

/// Payload for inserting a product. Carries no id: ids only come back from the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInsert {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub quantity: u32,
    pub product_image: String,
}

/// Payload for updating a product. `None` leaves a field as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub quantity: Option<u32>,
    pub product_image: Option<String>,
}

/// The mutable form buffer behind the add and update product forms.
///
/// The buffer is shared by both forms. While `id` is set the buffer holds a product loaded
/// for editing; [`ProductDraft::default`] is the empty form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub id: Option<ProductId>,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub quantity: u32,
    pub product_image: String,
}

impl ProductDraft {
    /// Loads every field of `product`, including its id.
    pub fn editing(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            quantity: product.quantity,
            product_image: product.product_image.clone(),
        }
    }

    /// The buffer as an insert payload. Any id is left behind.
    pub fn to_insert(&self) -> ProductInsert {
        ProductInsert {
            name: self.name.clone(),
            price: self.price,
            description: self.description.clone(),
            quantity: self.quantity,
            product_image: self.product_image.clone(),
        }
    }

    /// The buffer as a full patch: every editable field is sent.
    pub fn to_patch(&self) -> ProductPatch {
        ProductPatch {
            name: Some(self.name.clone()),
            price: Some(self.price),
            description: Some(self.description.clone()),
            quantity: Some(self.quantity),
            product_image: Some(self.product_image.clone()),
        }
    }
}
