//! Booking schema

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::blank::blank_as_none;
use super::{BookingStatus, ValidationError};

/// Booking record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Booking {
    pub booking_id: i64,
    pub guest_id: i64,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub booking_status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Create booking request body
#[derive(Debug, Clone, Deserialize)]
pub struct BookingCreate {
    pub guest_id: i64,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub check_out_date: Option<NaiveDate>,
    #[serde(default)]
    pub booking_status: BookingStatus,
}

/// Validated booking, ready for insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBooking {
    pub guest_id: i64,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: Option<NaiveDate>,
    pub booking_status: BookingStatus,
}

impl BookingCreate {
    pub fn validate(self) -> Result<NewBooking, ValidationError> {
        if let Some(check_out) = self.check_out_date {
            if check_out < self.check_in_date {
                return Err(ValidationError::Inconsistent {
                    field: "check_out_date",
                    reason: "must not be before check_in_date",
                });
            }
        }

        Ok(NewBooking {
            guest_id: self.guest_id,
            room_id: self.room_id,
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            booking_status: self.booking_status,
        })
    }
}
