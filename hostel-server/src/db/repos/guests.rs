//! Guest repository
//!
//! - create: plain INSERT, uniqueness left to the phone/email/id-proof indexes
//! - list: all guests by id

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::{Guest, NewGuest};

/// Guest repository
pub struct GuestRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> GuestRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a guest and return the stored row.
    ///
    /// A duplicate phone number, email or id-proof number surfaces as
    /// [`DbError::Duplicate`].
    pub async fn create(&self, guest: NewGuest) -> Result<Guest, DbError> {
        let created: Guest = sqlx::query_as(
            r#"
            INSERT INTO guests (full_name, phone_number, email, id_proof_type, id_proof_number, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING guest_id, full_name, phone_number, email, id_proof_type,
                      id_proof_number, address, created_at
            "#,
        )
        .bind(&guest.full_name)
        .bind(&guest.phone_number)
        .bind(guest.email.as_deref())
        .bind(guest.id_proof_type.as_deref())
        .bind(guest.id_proof_number.as_deref())
        .bind(guest.address.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = DbError::from(e);
            if let DbError::Duplicate { constraint } = &err {
                tracing::warn!(%constraint, "Guest rejected as duplicate");
            }
            err
        })?;

        tracing::info!(guest_id = created.guest_id, "Created guest");
        Ok(created)
    }

    /// List all guests.
    pub async fn list(&self) -> Result<Vec<Guest>, DbError> {
        let guests = sqlx::query_as(
            r#"
            SELECT guest_id, full_name, phone_number, email, id_proof_type,
                   id_proof_number, address, created_at
            FROM guests
            ORDER BY guest_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(guests)
    }

    /// Get a single guest by id.
    pub async fn get(&self, guest_id: i64) -> Result<Guest, DbError> {
        sqlx::query_as(
            r#"
            SELECT guest_id, full_name, phone_number, email, id_proof_type,
                   id_proof_number, address, created_at
            FROM guests
            WHERE guest_id = $1
            "#,
        )
        .bind(guest_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("guest", guest_id))
    }
}
