//! Payment schema

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{optional_text, positive_amount};
use super::{PaymentMethod, ValidationError};

const MAX_REMARKS_LEN: usize = 255;

/// Payment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Payment {
    pub payment_id: i64,
    pub booking_id: i64,
    pub amount_paid: Decimal,
    pub payment_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub payment_method: PaymentMethod,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create payment request body
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentCreate {
    pub booking_id: i64,
    pub amount_paid: Decimal,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Validated payment, ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub booking_id: i64,
    pub amount_paid: Decimal,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub remarks: Option<String>,
}

impl PaymentCreate {
    pub fn validate(self) -> Result<NewPayment, ValidationError> {
        Ok(NewPayment {
            booking_id: self.booking_id,
            amount_paid: positive_amount("amount_paid", self.amount_paid)?,
            payment_date: self.payment_date,
            payment_method: self.payment_method,
            remarks: optional_text("remarks", self.remarks.as_deref(), MAX_REMARKS_LEN)?,
        })
    }
}
