//! Embedded schema bootstrap.
//!
//! The deployment carries no migration tooling; the two tables are created on startup when they
//! do not exist yet. Existing tables are left alone.
use sqlx::SqlitePool;

use crate::db::traits::StoreError;

const CREATE_PAYMENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS payments (
        order_id      TEXT PRIMARY KEY,
        telegram_id   TEXT NOT NULL,
        plan_name     TEXT NOT NULL,
        duration      TEXT NOT NULL,
        is_upgrade    BOOLEAN NOT NULL DEFAULT 0,
        status        TEXT NOT NULL DEFAULT 'created',
        txid          TEXT,
        crypto_amount TEXT NOT NULL DEFAULT '',
        crypto_type   TEXT NOT NULL DEFAULT '',
        confirmed_at  DATETIME
    );
"#;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        telegram_id TEXT PRIMARY KEY,
        plan_name   TEXT,
        expiry      DATETIME
    );
"#;

pub(crate) async fn create_tables(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query(CREATE_PAYMENTS).execute(pool).await?;
    sqlx::query(CREATE_USERS).execute(pool).await?;
    Ok(())
}
