//! Room schema

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{positive_amount, required_text};
use super::{RoomStatus, ValidationError};

const MAX_ROOM_NUMBER_LEN: usize = 10;
const MAX_ROOM_TYPE_LEN: usize = 50;

/// Room record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Room {
    pub room_id: i64,
    pub room_number: String,
    pub room_type: String,
    pub monthly_rent: Decimal,
    #[sqlx(try_from = "String")]
    pub occupancy_status: RoomStatus,
    pub created_at: DateTime<Utc>,
}

/// Create room request body
#[derive(Debug, Clone, Deserialize)]
pub struct RoomCreate {
    pub room_number: String,
    pub room_type: String,
    pub monthly_rent: Decimal,
    #[serde(default)]
    pub occupancy_status: RoomStatus,
}

/// Validated room, ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub room_number: String,
    pub room_type: String,
    pub monthly_rent: Decimal,
    pub occupancy_status: RoomStatus,
}

impl RoomCreate {
    pub fn validate(self) -> Result<NewRoom, ValidationError> {
        Ok(NewRoom {
            room_number: required_text("room_number", &self.room_number, MAX_ROOM_NUMBER_LEN)?,
            room_type: required_text("room_type", &self.room_type, MAX_ROOM_TYPE_LEN)?,
            monthly_rent: positive_amount("monthly_rent", self.monthly_rent)?,
            occupancy_status: self.occupancy_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn accepts_rent_as_number_or_string() {
        let from_number: RoomCreate = serde_json::from_str(
            r#"{"room_number": "101", "room_type": "Single", "monthly_rent": 4500.5}"#,
        )
        .unwrap();
        let from_string: RoomCreate = serde_json::from_str(
            r#"{"room_number": "101", "room_type": "Single", "monthly_rent": "4500.50"}"#,
        )
        .unwrap();

        assert_eq!(from_number.monthly_rent, from_string.monthly_rent);
        assert_eq!(from_number.occupancy_status, RoomStatus::Available);
    }

    #[test]
    fn rejects_zero_rent() {
        let req = RoomCreate {
            room_number: "101".into(),
            room_type: "Single".into(),
            monthly_rent: Decimal::ZERO,
            occupancy_status: RoomStatus::Available,
        };
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::NotPositive {
                field: "monthly_rent"
            }
        );
    }

    #[test]
    fn rejects_long_room_number() {
        let req = RoomCreate {
            room_number: "A-101-NORTH".into(),
            room_type: "Single".into(),
            monthly_rent: Decimal::from_str("4500").unwrap(),
            occupancy_status: RoomStatus::Available,
        };
        assert!(matches!(
            req.validate().unwrap_err(),
            ValidationError::TooLong { field: "room_number", .. }
        ));
    }

    #[test]
    fn rejects_unknown_status() {
        let err = serde_json::from_str::<RoomCreate>(
            r#"{"room_number": "1", "room_type": "Dorm", "monthly_rent": 1, "occupancy_status": "Reserved"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn serializes_rent_as_string() {
        let room = Room {
            room_id: 1,
            room_number: "101".into(),
            room_type: "Single".into(),
            monthly_rent: Decimal::from_str("4500.00").unwrap(),
            occupancy_status: RoomStatus::Occupied,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["monthly_rent"], "4500.00");
        assert_eq!(json["occupancy_status"], "Occupied");
    }
}
