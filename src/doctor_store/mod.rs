//! # Doctors Collection
//!
//! The `Doctors` table of the data service. The panel only ever inserts into it.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::DoctorClient;
use crate::model::Doctor;
use record_gateway::Collection;

/// Creates a new Doctors collection and its client.
pub fn new(buffer_size: usize) -> (Collection<Doctor>, DoctorClient) {
    let (collection, generic_client) = Collection::new(buffer_size);
    (collection, DoctorClient::new(generic_client))
}
