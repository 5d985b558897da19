//! # Doctor Client
//!
//! Provides a high‑level API for the `Doctors` collection.
use crate::doctor_store::DoctorError;
use crate::model::{Doctor, DoctorDraft};
use async_trait::async_trait;
use record_gateway::{CollectionClient, GatewayClient, GatewayError};
use tracing::{debug, instrument};

/// Client for the Doctors collection.
#[derive(Clone)]
pub struct DoctorClient {
    inner: GatewayClient<Doctor>,
}

impl DoctorClient {
    pub fn new(inner: GatewayClient<Doctor>) -> Self {
        Self { inner }
    }

    // `params` is recorded through the redacting Debug impl
    #[instrument(skip(self))]
    pub async fn insert_doctor(&self, params: DoctorDraft) -> Result<Doctor, DoctorError> {
        debug!("Sending request");
        self.inner.insert(params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl CollectionClient<Doctor> for DoctorClient {
    type Error = DoctorError;

    fn inner(&self) -> &GatewayClient<Doctor> {
        &self.inner
    }

    fn map_error(e: GatewayError) -> Self::Error {
        DoctorError::Gateway(e.to_string())
    }
}
