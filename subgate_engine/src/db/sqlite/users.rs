use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::{db::traits::StoreError, db_types::User};

pub(crate) async fn fetch_user(telegram_id: &str, conn: &mut SqliteConnection) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>("SELECT telegram_id, plan_name, expiry FROM users WHERE telegram_id = $1")
        .bind(telegram_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(user)
}

/// Upgrade path: only the plan label changes. The existing expiry stays in force.
pub(crate) async fn set_plan(
    telegram_id: &str,
    plan_name: &str,
    conn: &mut SqliteConnection,
) -> Result<u64, StoreError> {
    let result = sqlx::query("UPDATE users SET plan_name = $1 WHERE telegram_id = $2")
        .bind(plan_name)
        .bind(telegram_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// Regular activation: plan label and expiry are written together.
pub(crate) async fn set_plan_and_expiry(
    telegram_id: &str,
    plan_name: &str,
    expiry: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<u64, StoreError> {
    let result = sqlx::query("UPDATE users SET plan_name = $1, expiry = $2 WHERE telegram_id = $3")
        .bind(plan_name)
        .bind(expiry)
        .bind(telegram_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// Seeds or replaces a user row. Users are normally provisioned by the storefront before any
/// payment exists; this is here for that flow and for tests.
pub(crate) async fn upsert_user(user: &User, conn: &mut SqliteConnection) -> Result<(), StoreError> {
    sqlx::query(
        r#"
            INSERT INTO users (telegram_id, plan_name, expiry) VALUES ($1, $2, $3)
            ON CONFLICT (telegram_id) DO UPDATE SET plan_name = excluded.plan_name, expiry = excluded.expiry
        "#,
    )
    .bind(&user.telegram_id)
    .bind(&user.plan_name)
    .bind(user.expiry)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
