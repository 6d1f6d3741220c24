use std::fmt::Debug;

use chrono::Utc;
use log::*;
use sqlx::SqlitePool;

use super::{new_pool, payments, schema, users};
use crate::{
    db::traits::{ConfirmOutcome, PaymentQuery, ReconciliationStore, StoreError},
    db_types::{NewPayment, OrderId, Payment, PaymentStatus, User, UPGRADE_PLAN_NAME},
};

/// SQLite-backed entitlement store. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteStore ({:?})", self.pool)
    }
}

impl SqliteStore {
    /// Connects a bounded pool to the given database URL and creates the schema if it is missing.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        schema::create_tables(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Provisions a payment row for a freshly created order. Callbacks never create rows, so the
    /// storefront must call this before handing the payment address to the gateway.
    pub async fn insert_payment(&self, payment: &NewPayment) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::insert_payment(payment, &mut conn).await?;
        debug!("🗃️ Payment {} provisioned for user {}", payment.order_id, payment.telegram_id);
        Ok(())
    }

    /// Seeds or replaces a user row.
    pub async fn upsert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        users::upsert_user(user, &mut conn).await
    }
}

impl ReconciliationStore for SqliteStore {
    async fn confirm_payment(&self, order_id: &OrderId, txid: Option<String>) -> Result<ConfirmOutcome, StoreError> {
        let mut tx = self.pool.begin().await?;
        let Some(payment) = payments::fetch_payment(order_id, &mut tx).await? else {
            return Ok(ConfirmOutcome::NotFound);
        };
        if payment.status == PaymentStatus::Completed {
            debug!("🗃️ Payment {order_id} is already completed. Nothing to do.");
            return Ok(ConfirmOutcome::AlreadyCompleted { payment });
        }
        let now = Utc::now();
        let new_expiry = if payment.is_upgrade {
            let n = users::set_plan(&payment.telegram_id, UPGRADE_PLAN_NAME, &mut tx).await?;
            if n == 0 {
                warn!("🗃️ Payment {order_id} confirmed, but user {} has no record to upgrade", payment.telegram_id);
            }
            None
        } else {
            let expiry = now + payment.plan_duration().expiry_offset();
            let n = users::set_plan_and_expiry(&payment.telegram_id, &payment.plan_name, expiry, &mut tx).await?;
            if n == 0 {
                warn!("🗃️ Payment {order_id} confirmed, but user {} has no record to activate", payment.telegram_id);
            }
            Some(expiry)
        };
        payments::complete_payment(order_id, txid.as_deref(), now, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Payment {order_id} completed. User {} entitlement updated.", payment.telegram_id);
        let payment = Payment { status: PaymentStatus::Completed, txid, confirmed_at: Some(now), ..payment };
        Ok(ConfirmOutcome::Confirmed { payment, new_expiry })
    }

    async fn mark_payment_pending(
        &self,
        order_id: &OrderId,
        txid: Option<String>,
    ) -> Result<Option<Payment>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let Some(payment) = payments::fetch_payment(order_id, &mut tx).await? else {
            return Ok(None);
        };
        payments::mark_pending(order_id, txid.as_deref(), &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Payment {order_id} marked as pending confirmation");
        let payment = Payment { status: PaymentStatus::Pending, txid, ..payment };
        Ok(Some(payment))
    }
}

impl PaymentQuery for SqliteStore {
    async fn payment_by_order_id(&self, order_id: &OrderId) -> Result<Option<Payment>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::fetch_payment(order_id, &mut conn).await
    }

    async fn user_by_telegram_id(&self, telegram_id: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        users::fetch_user(telegram_id, &mut conn).await
    }
}
