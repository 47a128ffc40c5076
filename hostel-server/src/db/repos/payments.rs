//! Payment repository

use sqlx::PgPool;

use crate::db::gateway::with_transaction;
use crate::db::DbError;
use crate::models::{NewPayment, Payment};

/// Payment repository
pub struct PaymentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a payment against an existing booking.
    ///
    /// Returns [`DbError::NotFound`] (and writes nothing) if the booking
    /// does not exist.
    pub async fn create(&self, payment: NewPayment) -> Result<Payment, DbError> {
        let created = with_transaction(self.pool, move |tx| {
            Box::pin(async move {
                let booking_exists: (bool,) =
                    sqlx::query_as("SELECT EXISTS(SELECT 1 FROM bookings WHERE booking_id = $1)")
                        .bind(payment.booking_id)
                        .fetch_one(&mut **tx)
                        .await?;

                if !booking_exists.0 {
                    return Err(DbError::not_found("booking", payment.booking_id));
                }

                let created: Payment = sqlx::query_as(
                    r#"
                    INSERT INTO payments (booking_id, amount_paid, payment_date, payment_method, remarks)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING payment_id, booking_id, amount_paid, payment_date, payment_method,
                              remarks, created_at
                    "#,
                )
                .bind(payment.booking_id)
                .bind(payment.amount_paid)
                .bind(payment.payment_date)
                .bind(payment.payment_method.as_str())
                .bind(payment.remarks.as_deref())
                .fetch_one(&mut **tx)
                .await?;

                Ok::<_, DbError>(created)
            })
        })
        .await?;

        tracing::info!(
            payment_id = created.payment_id,
            booking_id = created.booking_id,
            amount = %created.amount_paid,
            "Recorded payment"
        );
        Ok(created)
    }

    /// List all payments, most recent payment date first.
    pub async fn list(&self) -> Result<Vec<Payment>, DbError> {
        let payments = sqlx::query_as(
            r#"
            SELECT payment_id, booking_id, amount_paid, payment_date, payment_method,
                   remarks, created_at
            FROM payments
            ORDER BY payment_date DESC, payment_id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(payments)
    }
}
