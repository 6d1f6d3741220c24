use chrono::{DateTime, Utc};

use super::StoreError;
use crate::db_types::{OrderId, Payment};

/// Result of attempting the confirm transition on a payment row.
#[derive(Debug, Clone)]
pub enum ConfirmOutcome {
    /// The payment was transitioned to `completed` and the user's entitlement was updated.
    Confirmed {
        /// The payment row as it stands after the transition.
        payment: Payment,
        /// The entitlement expiry that was written. `None` for upgrades, which leave expiry
        /// untouched.
        new_expiry: Option<DateTime<Utc>>,
    },
    /// The row was already `completed`. Nothing was written.
    AlreadyCompleted { payment: Payment },
    /// No payment row exists for the order id.
    NotFound,
}

/// Mutating flows of the reconciliation engine.
///
/// Implementations must run each flow's reads and writes inside a single transaction: the confirm
/// transition in particular is a compare-and-swap on `status != completed`, executed atomically
/// with the entitlement update, so that a re-delivered confirmation cannot double-apply.
#[allow(async_fn_in_trait)]
pub trait ReconciliationStore {
    /// Confirm the payment for `order_id`, in a single atomic transaction:
    /// * If no row exists, nothing happens and [`ConfirmOutcome::NotFound`] is returned.
    /// * If the row is already `completed`, nothing happens and
    ///   [`ConfirmOutcome::AlreadyCompleted`] is returned.
    /// * For an upgrade payment, only the user's plan label changes (to the upgrade target);
    ///   expiry is untouched.
    /// * For a regular payment, the user's plan label and expiry (now + the purchased duration)
    ///   are both written.
    /// * The payment row becomes `completed`, with `txid` and `confirmed_at` set.
    async fn confirm_payment(&self, order_id: &OrderId, txid: Option<String>) -> Result<ConfirmOutcome, StoreError>;

    /// Record that the gateway has seen the transaction but is still waiting for confirmations.
    /// Sets `status = pending` and overwrites `txid`. The user record is not touched. Returns the
    /// updated row, or `None` if no payment exists for the order id.
    async fn mark_payment_pending(&self, order_id: &OrderId, txid: Option<String>)
        -> Result<Option<Payment>, StoreError>;
}
