//! Record trait implementation for the Doctor domain type.
//!
//! Doctors are insert-only from the panel's point of view, so the patch type is
//! uninhabited and `update_by_key` can never be called for this collection.

use super::error::DoctorError;
use crate::model::{Doctor, DoctorDraft, DoctorId};
use async_trait::async_trait;
use record_gateway::Record;
use std::convert::Infallible;

#[async_trait]
impl Record for Doctor {
    const COLLECTION: &'static str = "Doctors";
    type Key = DoctorId;
    type Insert = DoctorDraft;
    type Patch = Infallible;
    type Error = DoctorError;

    fn from_insert(id: DoctorId, params: DoctorDraft) -> Result<Self, Self::Error> {
        let fields = [
            ("name", &params.name),
            ("specialization", &params.specialization),
            ("email", &params.email),
            ("password", &params.password),
            ("telephone", &params.telephone),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(DoctorError::MissingField(*field));
        }

        Ok(Self {
            id,
            name: params.name,
            specialization: params.specialization,
            email: params.email,
            password: params.password,
            telephone: params.telephone,
        })
    }

    async fn on_update(&mut self, patch: Infallible) -> Result<(), Self::Error> {
        match patch {}
    }
}
