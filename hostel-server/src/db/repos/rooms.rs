//! Room repository

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::{NewRoom, Room};

/// Room repository
pub struct RoomRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> RoomRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a room. A taken room number surfaces as [`DbError::Duplicate`].
    pub async fn create(&self, room: NewRoom) -> Result<Room, DbError> {
        let created: Room = sqlx::query_as(
            r#"
            INSERT INTO rooms (room_number, room_type, monthly_rent, occupancy_status)
            VALUES ($1, $2, $3, $4)
            RETURNING room_id, room_number, room_type, monthly_rent, occupancy_status, created_at
            "#,
        )
        .bind(&room.room_number)
        .bind(&room.room_type)
        .bind(room.monthly_rent)
        .bind(room.occupancy_status.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = DbError::from(e);
            if let DbError::Duplicate { .. } = &err {
                tracing::warn!(room_number = %room.room_number, "Room number already exists");
            }
            err
        })?;

        tracing::info!(
            room_id = created.room_id,
            room_number = %created.room_number,
            "Created room"
        );
        Ok(created)
    }

    /// List all rooms.
    pub async fn list(&self) -> Result<Vec<Room>, DbError> {
        let rooms = sqlx::query_as(
            r#"
            SELECT room_id, room_number, room_type, monthly_rent, occupancy_status, created_at
            FROM rooms
            ORDER BY room_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rooms)
    }

    /// Get a single room by id.
    pub async fn get(&self, room_id: i64) -> Result<Room, DbError> {
        sqlx::query_as(
            r#"
            SELECT room_id, room_number, room_type, monthly_rent, occupancy_status, created_at
            FROM rooms
            WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("room", room_id))
    }
}
