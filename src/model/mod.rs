//! Plain data types for both collections and their form buffers.

pub mod doctor;
pub mod product;

pub use doctor::*;
pub use product::*;
