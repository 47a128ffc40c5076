//! Maintenance request schema and resolution policy
//!
//! # Resolved date policy
//!
//! - `Resolved` always carries a resolved date. If none is supplied,
//!   today's date is used, or the reported date if that is later. It may
//!   not precede the reported date.
//! - Any other status has no resolved date. Supplying one is rejected,
//!   and moving a request away from `Resolved` clears it.
//!
//! The same rules apply on create and on status update.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::blank::blank_as_none;
use super::validation::required_text;
use super::{MaintenanceStatus, ValidationError};

/// Maintenance request record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct MaintenanceRequest {
    pub request_id: i64,
    pub room_id: i64,
    pub guest_id: Option<i64>,
    pub issue_description: String,
    pub reported_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: MaintenanceStatus,
    pub resolved_date: Option<NaiveDate>,
}

/// Create maintenance request body
#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceRequestCreate {
    pub room_id: i64,
    #[serde(default)]
    pub guest_id: Option<i64>,
    pub issue_description: String,
    /// Defaults to today when omitted.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub reported_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: MaintenanceStatus,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub resolved_date: Option<NaiveDate>,
}

/// Validated maintenance request, ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaintenanceRequest {
    pub room_id: i64,
    pub guest_id: Option<i64>,
    pub issue_description: String,
    pub reported_date: NaiveDate,
    pub status: MaintenanceStatus,
    pub resolved_date: Option<NaiveDate>,
}

/// Status update parameters (query string or JSON body)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceUpdate {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<MaintenanceStatus>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub resolved_date: Option<NaiveDate>,
}

/// Validated status change, not yet applied to a stored request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: MaintenanceStatus,
    /// Explicit resolution date. Only ever set when status is `Resolved`.
    pub resolved_date: Option<NaiveDate>,
    /// Fallback resolution date for `Resolved` without an explicit one.
    pub today: NaiveDate,
}

impl StatusChange {
    fn new(
        status: MaintenanceStatus,
        resolved_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if status != MaintenanceStatus::Resolved && resolved_date.is_some() {
            return Err(ValidationError::Inconsistent {
                field: "resolved_date",
                reason: "may only be set when status is Resolved",
            });
        }

        Ok(Self {
            status,
            resolved_date,
            today,
        })
    }

    /// Resolved date to store for a request reported on `reported_date`.
    ///
    /// A `Resolved` change without a date resolves today, or on the
    /// reported date when that is still in the future.
    pub fn resolved_date_for(
        &self,
        reported_date: NaiveDate,
    ) -> Result<Option<NaiveDate>, ValidationError> {
        match (self.status, self.resolved_date) {
            (MaintenanceStatus::Resolved, Some(resolved)) if resolved < reported_date => {
                Err(ValidationError::Inconsistent {
                    field: "resolved_date",
                    reason: "must not be before reported_date",
                })
            }
            (MaintenanceStatus::Resolved, Some(resolved)) => Ok(Some(resolved)),
            (MaintenanceStatus::Resolved, None) => Ok(Some(self.today.max(reported_date))),
            _ => Ok(None),
        }
    }
}

impl MaintenanceRequestCreate {
    pub fn validate(self, today: NaiveDate) -> Result<NewMaintenanceRequest, ValidationError> {
        let issue_description =
            required_text("issue_description", &self.issue_description, usize::MAX)?;
        let reported_date = self.reported_date.unwrap_or(today);

        let change = StatusChange::new(self.status, self.resolved_date, today)?;
        let resolved_date = change.resolved_date_for(reported_date)?;

        Ok(NewMaintenanceRequest {
            room_id: self.room_id,
            guest_id: self.guest_id,
            issue_description,
            reported_date,
            status: change.status,
            resolved_date,
        })
    }
}

impl MaintenanceUpdate {
    /// Overlay `other` on top of `self`, field by field.
    pub fn merge(self, other: MaintenanceUpdate) -> MaintenanceUpdate {
        MaintenanceUpdate {
            status: other.status.or(self.status),
            resolved_date: other.resolved_date.or(self.resolved_date),
        }
    }

    /// Check the update on its own. The resolved date is settled against
    /// the stored reported date with [`StatusChange::resolved_date_for`].
    pub fn validate(self, today: NaiveDate) -> Result<StatusChange, ValidationError> {
        let status = self
            .status
            .ok_or(ValidationError::Empty { field: "status" })?;

        StatusChange::new(status, self.resolved_date, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 5, 20)
    }

    fn resolve(resolved_date: Option<NaiveDate>) -> StatusChange {
        MaintenanceUpdate {
            status: Some(MaintenanceStatus::Resolved),
            resolved_date,
        }
        .validate(today())
        .unwrap()
    }

    #[test]
    fn resolved_defaults_to_today() {
        let change = resolve(None);
        assert_eq!(
            change.resolved_date_for(date(2024, 5, 1)).unwrap(),
            Some(today())
        );
    }

    #[test]
    fn resolved_default_follows_future_report() {
        let change = resolve(None);
        assert_eq!(
            change.resolved_date_for(date(2024, 6, 1)).unwrap(),
            Some(date(2024, 6, 1))
        );
    }

    #[test]
    fn resolved_keeps_given_date() {
        let change = resolve(Some(date(2024, 5, 18)));
        assert_eq!(
            change.resolved_date_for(date(2024, 5, 1)).unwrap(),
            Some(date(2024, 5, 18))
        );
    }

    #[test]
    fn unresolved_clears_date() {
        let change = MaintenanceUpdate {
            status: Some(MaintenanceStatus::InProgress),
            resolved_date: None,
        }
        .validate(today())
        .unwrap();
        assert_eq!(change.resolved_date_for(date(2024, 5, 1)).unwrap(), None);
    }

    #[test]
    fn unresolved_with_date_is_rejected() {
        let err = MaintenanceUpdate {
            status: Some(MaintenanceStatus::Pending),
            resolved_date: Some(today()),
        }
        .validate(today())
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Inconsistent {
                field: "resolved_date",
                ..
            }
        ));
    }

    #[test]
    fn status_is_required() {
        let err = MaintenanceUpdate::default().validate(today()).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "status" });
    }

    #[test]
    fn body_overrides_query() {
        let query = MaintenanceUpdate {
            status: Some(MaintenanceStatus::InProgress),
            resolved_date: None,
        };
        let body = MaintenanceUpdate {
            status: Some(MaintenanceStatus::Resolved),
            resolved_date: Some(date(2024, 5, 19)),
        };
        let merged = query.merge(body);
        assert_eq!(merged.status, Some(MaintenanceStatus::Resolved));
        assert_eq!(merged.resolved_date, Some(date(2024, 5, 19)));
    }

    #[test]
    fn resolved_before_reported_is_rejected() {
        let change = resolve(Some(date(2024, 5, 1)));
        assert!(change.resolved_date_for(date(2024, 5, 2)).is_err());
        assert!(change.resolved_date_for(date(2024, 5, 1)).is_ok());
    }

    #[test]
    fn create_from_frontend_form() {
        let req: MaintenanceRequestCreate = serde_json::from_str(
            r#"{
                "room_id": 2,
                "guest_id": null,
                "issue_description": "Leaking tap",
                "reported_date": "2024-05-19",
                "status": "Pending"
            }"#,
        )
        .unwrap();

        let new = req.validate(today()).unwrap();
        assert_eq!(new.guest_id, None);
        assert_eq!(new.reported_date, date(2024, 5, 19));
        assert_eq!(new.resolved_date, None);
    }

    #[test]
    fn create_defaults_reported_date() {
        let req: MaintenanceRequestCreate =
            serde_json::from_str(r#"{"room_id": 2, "issue_description": "Fan broken"}"#).unwrap();
        let new = req.validate(today()).unwrap();
        assert_eq!(new.reported_date, today());
        assert_eq!(new.status, MaintenanceStatus::Pending);
    }

    #[test]
    fn create_resolved_in_the_past_of_report_is_rejected() {
        let req: MaintenanceRequestCreate = serde_json::from_str(
            r#"{
                "room_id": 2,
                "issue_description": "Fan broken",
                "reported_date": "2024-05-19",
                "status": "Resolved",
                "resolved_date": "2024-05-10"
            }"#,
        )
        .unwrap();
        assert!(req.validate(today()).is_err());
    }

    #[test]
    fn create_resolved_with_future_report() {
        let req: MaintenanceRequestCreate = serde_json::from_str(
            r#"{
                "room_id": 2,
                "issue_description": "Fan broken",
                "reported_date": "2024-06-01",
                "status": "Resolved"
            }"#,
        )
        .unwrap();

        let new = req.validate(today()).unwrap();
        assert_eq!(new.resolved_date, Some(date(2024, 6, 1)));
    }

    #[test]
    fn create_rejects_blank_description() {
        let req: MaintenanceRequestCreate =
            serde_json::from_str(r#"{"room_id": 2, "issue_description": "  "}"#).unwrap();
        assert_eq!(
            req.validate(today()).unwrap_err(),
            ValidationError::Empty {
                field: "issue_description"
            }
        );
    }
}
