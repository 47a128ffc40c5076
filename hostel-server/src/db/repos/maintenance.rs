//! Maintenance request repository
//!
//! The only entity with a post-creation mutation: status updates lock the
//! request row, check the new resolved date against the stored reported
//! date, then write both fields.

use sqlx::PgPool;

use crate::db::gateway::with_transaction;
use crate::db::DbError;
use crate::models::{MaintenanceRequest, NewMaintenanceRequest, StatusChange};

/// Maintenance request repository
pub struct MaintenanceRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MaintenanceRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Open a maintenance request for a room, optionally reported by a guest.
    pub async fn create(&self, request: NewMaintenanceRequest) -> Result<MaintenanceRequest, DbError> {
        let created = with_transaction(self.pool, move |tx| {
            Box::pin(async move {
                let room_exists: (bool,) =
                    sqlx::query_as("SELECT EXISTS(SELECT 1 FROM rooms WHERE room_id = $1)")
                        .bind(request.room_id)
                        .fetch_one(&mut **tx)
                        .await?;

                if !room_exists.0 {
                    return Err(DbError::not_found("room", request.room_id));
                }

                if let Some(guest_id) = request.guest_id {
                    let guest_exists: (bool,) =
                        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM guests WHERE guest_id = $1)")
                            .bind(guest_id)
                            .fetch_one(&mut **tx)
                            .await?;

                    if !guest_exists.0 {
                        return Err(DbError::not_found("guest", guest_id));
                    }
                }

                let created: MaintenanceRequest = sqlx::query_as(
                    r#"
                    INSERT INTO maintenance_requests
                        (room_id, guest_id, issue_description, reported_date, status, resolved_date)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING request_id, room_id, guest_id, issue_description, reported_date,
                              status, resolved_date
                    "#,
                )
                .bind(request.room_id)
                .bind(request.guest_id)
                .bind(&request.issue_description)
                .bind(request.reported_date)
                .bind(request.status.as_str())
                .bind(request.resolved_date)
                .fetch_one(&mut **tx)
                .await?;

                Ok::<_, DbError>(created)
            })
        })
        .await?;

        tracing::info!(
            request_id = created.request_id,
            room_id = created.room_id,
            "Opened maintenance request"
        );
        Ok(created)
    }

    /// List all requests, most recently reported first.
    pub async fn list(&self) -> Result<Vec<MaintenanceRequest>, DbError> {
        let requests = sqlx::query_as(
            r#"
            SELECT request_id, room_id, guest_id, issue_description, reported_date,
                   status, resolved_date
            FROM maintenance_requests
            ORDER BY reported_date DESC, request_id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(requests)
    }

    /// Set status and resolved date of an existing request.
    ///
    /// A `Resolved` change without a date is settled against the stored
    /// reported date under the row lock.
    ///
    /// # Errors
    ///
    /// - [`DbError::NotFound`] if `request_id` is unknown
    /// - [`DbError::Invalid`] if the resolved date precedes the reported date
    pub async fn update_status(
        &self,
        request_id: i64,
        change: StatusChange,
    ) -> Result<MaintenanceRequest, DbError> {
        let updated = with_transaction(self.pool, move |tx| {
            Box::pin(async move {
                let reported: Option<(chrono::NaiveDate,)> = sqlx::query_as(
                    "SELECT reported_date FROM maintenance_requests WHERE request_id = $1 FOR UPDATE",
                )
                .bind(request_id)
                .fetch_optional(&mut **tx)
                .await?;

                let Some((reported_date,)) = reported else {
                    return Err(DbError::not_found("maintenance request", request_id));
                };

                let resolved_date = change.resolved_date_for(reported_date)?;

                let updated: MaintenanceRequest = sqlx::query_as(
                    r#"
                    UPDATE maintenance_requests
                    SET status = $1, resolved_date = $2
                    WHERE request_id = $3
                    RETURNING request_id, room_id, guest_id, issue_description, reported_date,
                              status, resolved_date
                    "#,
                )
                .bind(change.status.as_str())
                .bind(resolved_date)
                .bind(request_id)
                .fetch_one(&mut **tx)
                .await?;

                Ok::<_, DbError>(updated)
            })
        })
        .await?;

        tracing::info!(
            request_id,
            status = %updated.status,
            "Updated maintenance request"
        );
        Ok(updated)
    }
}
