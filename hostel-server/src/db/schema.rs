//! Table definitions and database provisioning
//!
//! Everything here is idempotent (`IF NOT EXISTS`), so it runs on every
//! startup. Status and method columns are TEXT guarded by CHECK
//! constraints listing the labels from [`crate::models::status`].

use sqlx::postgres::PgConnection;
use sqlx::{Connection, PgPool};

use crate::config::{ConfigError, DbConfig};
use crate::db::gateway::with_transaction;
use crate::db::pool::{create_pool, PoolError};

/// SQLSTATE `invalid_catalog_name`: the database does not exist.
const UNDEFINED_DATABASE: &str = "3D000";

/// SQLSTATE `duplicate_database`: another process created it first.
const DUPLICATE_DATABASE: &str = "42P04";

/// Advisory lock key serializing concurrent `create_tables` runs.
/// Concurrent `CREATE TABLE IF NOT EXISTS` can otherwise fail on pg_type.
const SCHEMA_LOCK_KEY: i64 = 0x686f_7374_656c;

/// Provisioning error
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid database name '{0}'")]
    InvalidDatabaseName(String),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// `(table, DDL)` in creation order. Referenced tables come first.
pub const TABLES: &[(&str, &str)] = &[
    (
        "guests",
        r#"
        CREATE TABLE IF NOT EXISTS guests (
            guest_id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
            full_name VARCHAR(100) NOT NULL,
            phone_number VARCHAR(15) NOT NULL UNIQUE CHECK (phone_number <> ''),
            email VARCHAR(100) UNIQUE,
            id_proof_type VARCHAR(50),
            id_proof_number VARCHAR(50) UNIQUE,
            address TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "rooms",
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            room_id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
            room_number VARCHAR(10) NOT NULL UNIQUE,
            room_type VARCHAR(50) NOT NULL,
            monthly_rent NUMERIC(10,2) NOT NULL CHECK (monthly_rent > 0),
            occupancy_status TEXT NOT NULL DEFAULT 'Available'
                CHECK (occupancy_status IN ('Available', 'Occupied', 'Maintenance')),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "bookings",
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            booking_id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
            guest_id BIGINT NOT NULL REFERENCES guests(guest_id) ON DELETE CASCADE,
            room_id BIGINT NOT NULL REFERENCES rooms(room_id) ON DELETE CASCADE,
            check_in_date DATE NOT NULL,
            check_out_date DATE,
            booking_status TEXT NOT NULL DEFAULT 'Active'
                CHECK (booking_status IN ('Active', 'Completed', 'Cancelled')),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "payments",
        r#"
        CREATE TABLE IF NOT EXISTS payments (
            payment_id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
            booking_id BIGINT NOT NULL REFERENCES bookings(booking_id) ON DELETE CASCADE,
            amount_paid NUMERIC(10,2) NOT NULL CHECK (amount_paid > 0),
            payment_date DATE NOT NULL,
            payment_method TEXT NOT NULL
                CHECK (payment_method IN ('Cash', 'UPI', 'Card', 'Bank Transfer')),
            remarks VARCHAR(255),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
            username VARCHAR(50) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            role TEXT NOT NULL DEFAULT 'Staff' CHECK (role IN ('Admin', 'Staff')),
            last_login TIMESTAMPTZ,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "maintenance_requests",
        r#"
        CREATE TABLE IF NOT EXISTS maintenance_requests (
            request_id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
            room_id BIGINT NOT NULL REFERENCES rooms(room_id) ON DELETE CASCADE,
            guest_id BIGINT REFERENCES guests(guest_id) ON DELETE SET NULL,
            issue_description TEXT NOT NULL,
            reported_date DATE NOT NULL DEFAULT CURRENT_DATE,
            status TEXT NOT NULL DEFAULT 'Pending'
                CHECK (status IN ('Pending', 'In Progress', 'Resolved')),
            resolved_date DATE
        )
        "#,
    ),
];

/// Secondary indexes for foreign keys and list ordering.
const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS bookings_room_id_idx ON bookings (room_id)",
    "CREATE INDEX IF NOT EXISTS bookings_guest_id_idx ON bookings (guest_id)",
    "CREATE INDEX IF NOT EXISTS payments_booking_id_idx ON payments (booking_id)",
    "CREATE INDEX IF NOT EXISTS payments_payment_date_idx ON payments (payment_date DESC)",
    "CREATE INDEX IF NOT EXISTS maintenance_requests_reported_date_idx ON maintenance_requests (reported_date DESC)",
];

/// Create the database (if missing) and all tables, returning a pool
/// connected to it.
pub async fn provision(config: &DbConfig) -> Result<PgPool, SchemaError> {
    ensure_database(config).await?;
    let pool = create_pool(config).await?;
    create_tables(&pool).await?;
    Ok(pool)
}

/// Create the hostel database if the server does not have it yet.
///
/// Connects to the target database first, so a role without access to
/// the maintenance database still works once the database exists.
pub async fn ensure_database(config: &DbConfig) -> Result<(), SchemaError> {
    let name = config.database_name()?;

    match PgConnection::connect_with(&config.connect_options()?).await {
        Ok(conn) => {
            conn.close().await?;
            tracing::debug!(database = %name, "Database exists");
            return Ok(());
        }
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNDEFINED_DATABASE) => {}
        Err(e) => return Err(e.into()),
    }

    let statement = format!("CREATE DATABASE {}", quote_identifier(&name)?);
    let mut conn = PgConnection::connect_with(&config.server_options()?).await?;
    let created = match sqlx::query(&statement).execute(&mut conn).await {
        Ok(_) => true,
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(DUPLICATE_DATABASE) => false,
        Err(e) => return Err(e.into()),
    };
    conn.close().await?;

    if created {
        tracing::info!(database = %name, "Created database");
    } else {
        tracing::debug!(database = %name, "Database created concurrently");
    }
    Ok(())
}

/// Create all tables and indexes in one transaction.
pub async fn create_tables(pool: &PgPool) -> Result<(), SchemaError> {
    tracing::info!("Creating tables...");

    with_transaction(pool, |tx| {
        Box::pin(async move {
            sqlx::query("SELECT pg_advisory_xact_lock($1)")
                .bind(SCHEMA_LOCK_KEY)
                .execute(&mut **tx)
                .await?;

            for (table, ddl) in TABLES {
                tracing::debug!(table, "CREATE TABLE IF NOT EXISTS");
                sqlx::query(ddl).execute(&mut **tx).await?;
            }
            for ddl in INDEXES {
                sqlx::query(ddl).execute(&mut **tx).await?;
            }
            Ok::<_, SchemaError>(())
        })
    })
    .await?;

    tracing::info!(tables = TABLES.len(), "Database and tables are set up");
    Ok(())
}

/// Quote a database name for use in DDL, which cannot take bind parameters.
fn quote_identifier(name: &str) -> Result<String, SchemaError> {
    if name.is_empty() || name.len() > 63 || name.contains('\0') {
        return Err(SchemaError::InvalidDatabaseName(name.to_owned()));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}
