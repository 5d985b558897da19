use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Doctors. Assigned by the gateway but never tracked by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoctorId(pub u32);

impl From<u32> for DoctorId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for DoctorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "doctor_{}", self.0)
    }
}

/// A doctor row in the `Doctors` collection.
///
/// The password is stored as given. Hashing is not done anywhere in the panel; `Debug`
/// redacts it so it cannot end up in logs.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub password: String,
    pub telephone: String,
}

/// The add-doctor form buffer, which is also the insert payload.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctorDraft {
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub password: String,
    pub telephone: String,
}

impl std::fmt::Debug for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Doctor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("specialization", &self.specialization)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("telephone", &self.telephone)
            .finish()
    }
}

impl std::fmt::Debug for DoctorDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoctorDraft")
            .field("name", &self.name)
            .field("specialization", &self.specialization)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("telephone", &self.telephone)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_never_shows_the_password() {
        let draft = DoctorDraft {
            name: "Dr. Ada".into(),
            specialization: "Cardiology".into(),
            email: "ada@clinic.test".into(),
            password: "hunter2".into(),
            telephone: "555-0100".into(),
        };
        let rendered = format!("{:?}", draft);
        assert!(rendered.contains("Dr. Ada"));
        assert!(!rendered.contains("hunter2"));
    }
}
