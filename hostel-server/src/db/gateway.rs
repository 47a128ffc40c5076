//! Scoped connection and transaction helpers
//!
//! Both helpers own the acquired resource for the duration of the closure
//! and release it on every exit path. A transaction commits only when the
//! closure returns `Ok`; on `Err` it is rolled back before the error is
//! returned. If the future is dropped mid-flight the transaction guard
//! rolls back on drop.

use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

/// Open transaction handed to [`with_transaction`] closures.
pub type Tx = Transaction<'static, Postgres>;

/// Run `f` on a pooled connection.
///
/// # Example
///
/// ```ignore
/// let version: String = with_connection(&pool, |conn| {
///     Box::pin(async move {
///         let (v,): (String,) = sqlx::query_as("SHOW server_version")
///             .fetch_one(&mut *conn)
///             .await?;
///         Ok::<_, sqlx::Error>(v)
///     })
/// })
/// .await?;
/// ```
pub async fn with_connection<T, E, F>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, E>>,
    E: From<sqlx::Error>,
{
    let mut conn = pool.acquire().await?;
    // `conn` returns to the pool when it drops at the end of this scope
    f(&mut *conn).await
}

/// Run `f` inside a transaction: commit on `Ok`, roll back on `Err`.
pub async fn with_transaction<T, E, F>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: for<'c> FnOnce(&'c mut Tx) -> BoxFuture<'c, Result<T, E>>,
    E: From<sqlx::Error>,
{
    let mut tx = pool.begin().await?;

    match f(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}
