//! Database error type
//!
//! Constraint violations reported by PostgreSQL are classified here so
//! repositories can rely on the database instead of check-then-insert.

use sqlx::error::ErrorKind;

use crate::models::{RoomStatus, ValidationError};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A unique constraint rejected the row.
    #[error("duplicate value violates unique constraint '{constraint}'")]
    Duplicate { constraint: String },

    /// A foreign key points at a row that does not exist.
    #[error("referenced {resource} does not exist")]
    MissingReference { resource: &'static str },

    #[error("room {room_id} is not available (currently {status})")]
    RoomUnavailable { room_id: i64, status: RoomStatus },

    /// Input that could only be checked against stored state.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Whether the underlying error was reported by the database server
    /// (as opposed to pool, I/O or protocol failures).
    pub fn is_database_reported(&self) -> bool {
        matches!(self, Self::Sqlx(sqlx::Error::Database(_)))
    }
}

/// Map a foreign key constraint name to the resource it references.
///
/// Constraint names follow PostgreSQL's default `<table>_<column>_fkey`.
fn referenced_resource(constraint: Option<&str>) -> &'static str {
    let Some(constraint) = constraint else {
        return "record";
    };
    if constraint.ends_with("_guest_id_fkey") {
        "guest"
    } else if constraint.ends_with("_room_id_fkey") {
        "room"
    } else if constraint.ends_with("_booking_id_fkey") {
        "booking"
    } else {
        "record"
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return Self::Duplicate {
                        constraint: db_err.constraint().unwrap_or("unique").to_owned(),
                    };
                }
                ErrorKind::ForeignKeyViolation => {
                    return Self::MissingReference {
                        resource: referenced_resource(db_err.constraint()),
                    };
                }
                _ => {}
            }
        }
        Self::Sqlx(err)
    }
}
