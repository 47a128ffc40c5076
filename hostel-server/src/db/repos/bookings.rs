//! Booking repository
//!
//! Booking creation is the one multi-step write in the service:
//!
//! 1. lock the room row (`FOR UPDATE`)
//! 2. require the room to exist and be Available
//! 3. require the guest to exist
//! 4. insert the booking
//! 5. mark the room Occupied
//!
//! All of it runs in one transaction. Concurrent bookings for the same room
//! queue on the row lock, so only the first one ever sees Available.

use sqlx::PgPool;

use crate::db::gateway::with_transaction;
use crate::db::DbError;
use crate::models::{Booking, NewBooking, RoomStatus};

/// Booking repository
pub struct BookingRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Book a room for a guest (atomic).
    ///
    /// # Errors
    ///
    /// - [`DbError::NotFound`] if the room or guest does not exist
    /// - [`DbError::RoomUnavailable`] if the room is not Available
    ///
    /// On any error nothing is written: the room keeps its status and no
    /// booking row exists.
    pub async fn create(&self, booking: NewBooking) -> Result<Booking, DbError> {
        let created = with_transaction(self.pool, move |tx| {
            Box::pin(async move {
                let room: Option<(String,)> = sqlx::query_as(
                    "SELECT occupancy_status FROM rooms WHERE room_id = $1 FOR UPDATE",
                )
                .bind(booking.room_id)
                .fetch_optional(&mut **tx)
                .await?;

                let status: RoomStatus = match room {
                    Some((status,)) => status.parse()?,
                    None => return Err(DbError::not_found("room", booking.room_id)),
                };

                if status != RoomStatus::Available {
                    tracing::warn!(
                        room_id = booking.room_id,
                        %status,
                        "Booking rejected, room not available"
                    );
                    return Err(DbError::RoomUnavailable {
                        room_id: booking.room_id,
                        status,
                    });
                }

                let guest_exists: (bool,) =
                    sqlx::query_as("SELECT EXISTS(SELECT 1 FROM guests WHERE guest_id = $1)")
                        .bind(booking.guest_id)
                        .fetch_one(&mut **tx)
                        .await?;

                if !guest_exists.0 {
                    return Err(DbError::not_found("guest", booking.guest_id));
                }

                let created: Booking = sqlx::query_as(
                    r#"
                    INSERT INTO bookings (guest_id, room_id, check_in_date, check_out_date, booking_status)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING booking_id, guest_id, room_id, check_in_date, check_out_date,
                              booking_status, created_at
                    "#,
                )
                .bind(booking.guest_id)
                .bind(booking.room_id)
                .bind(booking.check_in_date)
                .bind(booking.check_out_date)
                .bind(booking.booking_status.as_str())
                .fetch_one(&mut **tx)
                .await?;

                sqlx::query("UPDATE rooms SET occupancy_status = $1 WHERE room_id = $2")
                    .bind(RoomStatus::Occupied.as_str())
                    .bind(booking.room_id)
                    .execute(&mut **tx)
                    .await?;

                Ok::<_, DbError>(created)
            })
        })
        .await?;

        tracing::info!(
            booking_id = created.booking_id,
            room_id = created.room_id,
            guest_id = created.guest_id,
            "Created booking, room now occupied"
        );
        Ok(created)
    }

    /// List all bookings.
    pub async fn list(&self) -> Result<Vec<Booking>, DbError> {
        let bookings = sqlx::query_as(
            r#"
            SELECT booking_id, guest_id, room_id, check_in_date, check_out_date,
                   booking_status, created_at
            FROM bookings
            ORDER BY booking_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(bookings)
    }

    /// Bookings for one room, newest first.
    pub async fn list_for_room(&self, room_id: i64) -> Result<Vec<Booking>, DbError> {
        let bookings = sqlx::query_as(
            r#"
            SELECT booking_id, guest_id, room_id, check_in_date, check_out_date,
                   booking_status, created_at
            FROM bookings
            WHERE room_id = $1
            ORDER BY booking_id DESC
            "#,
        )
        .bind(room_id)
        .fetch_all(self.pool)
        .await?;

        Ok(bookings)
    }
}
