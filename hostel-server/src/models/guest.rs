//! Guest schema

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{optional_text, required_text};
use super::ValidationError;

const MAX_FULL_NAME_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 15;
const MAX_EMAIL_LEN: usize = 100;
const MAX_ID_PROOF_LEN: usize = 50;

/// Guest record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Guest {
    pub guest_id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub id_proof_type: Option<String>,
    pub id_proof_number: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create guest request body
#[derive(Debug, Clone, Deserialize)]
pub struct GuestCreate {
    pub full_name: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub id_proof_type: Option<String>,
    #[serde(default)]
    pub id_proof_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Validated guest, ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    pub full_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub id_proof_type: Option<String>,
    pub id_proof_number: Option<String>,
    pub address: Option<String>,
}

impl GuestCreate {
    /// Validate the request.
    ///
    /// Blank optional fields become `None` so they never collide on the
    /// unique email / id-proof indexes.
    pub fn validate(self) -> Result<NewGuest, ValidationError> {
        let email = optional_text("email", self.email.as_deref(), MAX_EMAIL_LEN)?;
        if let Some(email) = &email {
            if !email.contains('@') {
                return Err(ValidationError::InvalidFormat {
                    field: "email",
                    reason: "must contain '@'",
                });
            }
        }

        Ok(NewGuest {
            full_name: required_text("full_name", &self.full_name, MAX_FULL_NAME_LEN)?,
            phone_number: required_text("phone_number", &self.phone_number, MAX_PHONE_LEN)?,
            email,
            id_proof_type: optional_text(
                "id_proof_type",
                self.id_proof_type.as_deref(),
                MAX_ID_PROOF_LEN,
            )?,
            id_proof_number: optional_text(
                "id_proof_number",
                self.id_proof_number.as_deref(),
                MAX_ID_PROOF_LEN,
            )?,
            address: optional_text("address", self.address.as_deref(), usize::MAX)?,
        })
    }
}
