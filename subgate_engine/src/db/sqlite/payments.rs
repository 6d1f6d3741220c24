use chrono::{DateTime, Utc};
use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db::traits::StoreError,
    db_types::{NewPayment, OrderId, Payment, PaymentStatus},
};

const PAYMENT_COLUMNS: &str = "order_id, telegram_id, plan_name, duration, is_upgrade, status, txid, crypto_amount, \
                               crypto_type, confirmed_at";

/// Returns the payment row for the given `order_id`, if one exists.
pub(crate) async fn fetch_payment(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, StoreError> {
    let query = format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE order_id = $1");
    let payment = sqlx::query_as::<_, Payment>(&query).bind(order_id).fetch_optional(&mut *conn).await?;
    Ok(payment)
}

/// Sets `status = pending` and overwrites `txid`. `confirmed_at` is untouched.
pub(crate) async fn mark_pending(
    order_id: &OrderId,
    txid: Option<&str>,
    conn: &mut SqliteConnection,
) -> Result<u64, StoreError> {
    let result = sqlx::query("UPDATE payments SET status = $1, txid = $2 WHERE order_id = $3")
        .bind(PaymentStatus::Pending)
        .bind(txid)
        .bind(order_id)
        .execute(&mut *conn)
        .await?;
    trace!("🗃️ Payment {order_id} marked pending ({} row(s))", result.rows_affected());
    Ok(result.rows_affected())
}

/// Transitions the row to `completed`, recording `txid` and `confirmed_at`.
///
/// The `status <> completed` guard is the compare-and-swap that makes re-delivered confirmations
/// a no-op: a row that already completed is simply not matched, and the caller sees zero rows
/// affected.
pub(crate) async fn complete_payment(
    order_id: &OrderId,
    txid: Option<&str>,
    confirmed_at: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<u64, StoreError> {
    let result =
        sqlx::query("UPDATE payments SET status = $1, txid = $2, confirmed_at = $3 WHERE order_id = $4 AND status <> $1")
            .bind(PaymentStatus::Completed)
            .bind(txid)
            .bind(confirmed_at)
            .bind(order_id)
            .execute(&mut *conn)
            .await?;
    Ok(result.rows_affected())
}

/// Inserts a freshly provisioned payment row with `created` status. The storefront calls this
/// when it hands the user a payment address; callbacks never create rows.
pub(crate) async fn insert_payment(payment: &NewPayment, conn: &mut SqliteConnection) -> Result<(), StoreError> {
    sqlx::query(
        r#"
            INSERT INTO payments (order_id, telegram_id, plan_name, duration, is_upgrade, crypto_amount, crypto_type, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(&payment.order_id)
    .bind(&payment.telegram_id)
    .bind(&payment.plan_name)
    .bind(&payment.duration)
    .bind(payment.is_upgrade)
    .bind(&payment.crypto_amount)
    .bind(&payment.crypto_type)
    .bind(PaymentStatus::Created)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
