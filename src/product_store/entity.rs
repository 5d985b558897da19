//! Record trait implementation for the Product domain type.
//!
//! Enforces the `Products` table constraints: every text column is required and the price
//! is non-negative. Violations surface to the caller as the gateway's failure message.

use super::error::ProductError;
use crate::model::{Product, ProductId, ProductInsert, ProductPatch};
use async_trait::async_trait;
use record_gateway::Record;
use rust_decimal::Decimal;

fn require(field: &'static str, value: &str) -> Result<(), ProductError> {
    if value.trim().is_empty() {
        return Err(ProductError::MissingField(field));
    }
    Ok(())
}

fn check_price(price: Decimal) -> Result<(), ProductError> {
    if price < Decimal::ZERO {
        return Err(ProductError::InvalidPrice(price));
    }
    Ok(())
}

#[async_trait]
impl Record for Product {
    const COLLECTION: &'static str = "Products";
    type Key = ProductId;
    type Insert = ProductInsert;
    type Patch = ProductPatch;
    type Error = ProductError;

    fn from_insert(id: ProductId, params: ProductInsert) -> Result<Self, Self::Error> {
        require("name", &params.name)?;
        require("description", &params.description)?;
        require("product_image", &params.product_image)?;
        check_price(params.price)?;

        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            description: params.description,
            quantity: params.quantity,
            product_image: params.product_image,
        })
    }

    /// Applies every field present in the patch, validating the same constraints as insert.
    async fn on_update(&mut self, patch: ProductPatch) -> Result<(), Self::Error> {
        if let Some(name) = patch.name {
            require("name", &name)?;
            self.name = name;
        }
        if let Some(price) = patch.price {
            check_price(price)?;
            self.price = price;
        }
        if let Some(description) = patch.description {
            require("description", &description)?;
            self.description = description;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(product_image) = patch.product_image {
            require("product_image", &product_image)?;
            self.product_image = product_image;
        }
        Ok(())
    }
}
