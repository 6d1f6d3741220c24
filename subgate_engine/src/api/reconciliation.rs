use std::fmt::Debug;

use log::*;

use crate::{
    api::ReconciliationError,
    db::traits::{ConfirmOutcome, PaymentQuery, ReconciliationStore},
    db_types::{OrderId, Payment},
    events::{EventProducers, PaymentConfirmedEvent, PaymentPendingEvent},
};

/// Status value the gateway sends for a fully confirmed transaction.
const STATUS_CONFIRMED: &str = "confirmed";
/// Status value for a transaction that is still gathering confirmations. Also the default when a
/// callback carries no status at all.
pub const STATUS_PENDING_CONFIRMATION: &str = "pending_confirmation";

/// The result of a successfully processed callback. The messages are what the webhook response
/// reports back to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Confirmed { upgraded: bool },
    /// The order was already completed; the callback was absorbed without touching anything.
    AlreadyCompleted,
    Pending,
}

impl CallbackOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            CallbackOutcome::Confirmed { upgraded: false } => "Payment confirmed and user activated",
            CallbackOutcome::Confirmed { upgraded: true } => "Payment confirmed and plan upgraded",
            CallbackOutcome::AlreadyCompleted => "Payment already completed",
            CallbackOutcome::Pending => "Payment pending confirmation",
        }
    }
}

/// `ReconciliationApi` is the primary API for mapping inbound payment-gateway callbacks onto
/// state transitions of payment records and the entitlement updates that go with them.
pub struct ReconciliationApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for ReconciliationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReconciliationApi")
    }
}

impl<B> ReconciliationApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> ReconciliationApi<B>
where B: ReconciliationStore + PaymentQuery
{
    /// Processes one payment-status callback from the gateway.
    ///
    /// The payment row is looked up first: callbacks for unknown orders always fail with
    /// [`ReconciliationError::PaymentNotFound`], whatever their status value. Then:
    /// * `confirmed` with at least one confirmation runs the confirm transition. A re-delivered
    ///   confirmation for an already-completed order is absorbed as
    ///   [`CallbackOutcome::AlreadyCompleted`]: success, but no mutation and no notification.
    /// * `pending_confirmation` records the transaction id and marks the payment pending.
    /// * Anything else, including `confirmed` with zero confirmations, is rejected with
    ///   [`ReconciliationError::InvalidPaymentStatus`].
    ///
    /// Events are published after the store transaction commits, never before.
    pub async fn process_callback(
        &self,
        order_id: &OrderId,
        status: &str,
        txid: Option<&str>,
        value: Option<&str>,
        confirmations: i64,
    ) -> Result<CallbackOutcome, ReconciliationError> {
        debug!(
            "🔄️ Processing payment callback: {order_id}, status: {status}, confirmations: {confirmations}, value: {}",
            value.unwrap_or("-")
        );
        let payment =
            self.db.payment_by_order_id(order_id).await?.ok_or_else(|| {
                warn!("🔄️ Payment not found for order: {order_id}");
                ReconciliationError::PaymentNotFound
            })?;
        trace!("🔄️ Callback targets payment for user {} (plan {})", payment.telegram_id, payment.plan_name);
        match status {
            STATUS_CONFIRMED if confirmations >= 1 => self.confirm(order_id, txid).await,
            STATUS_PENDING_CONFIRMATION => self.mark_pending(order_id, txid).await,
            _ => {
                warn!("🔄️ Rejecting callback for {order_id}: status {status} ({confirmations} confirmations)");
                Err(ReconciliationError::InvalidPaymentStatus)
            },
        }
    }

    /// Pure read of the stored payment row. No side effects.
    pub async fn payment_status(&self, order_id: &OrderId) -> Result<Option<Payment>, ReconciliationError> {
        let payment = self.db.payment_by_order_id(order_id).await?;
        Ok(payment)
    }

    async fn confirm(&self, order_id: &OrderId, txid: Option<&str>) -> Result<CallbackOutcome, ReconciliationError> {
        match self.db.confirm_payment(order_id, txid.map(String::from)).await? {
            ConfirmOutcome::NotFound => Err(ReconciliationError::PaymentNotFound),
            ConfirmOutcome::AlreadyCompleted { payment } => {
                info!("🔄️ Order {order_id} is already completed; duplicate confirmation absorbed");
                trace!("🔄️ Duplicate confirmation carried txid {:?}, row has {:?}", txid, payment.txid);
                Ok(CallbackOutcome::AlreadyCompleted)
            },
            ConfirmOutcome::Confirmed { payment, new_expiry } => {
                let upgraded = payment.is_upgrade;
                if upgraded {
                    info!("🔄️ User {} plan upgraded to {}", payment.telegram_id, crate::db_types::UPGRADE_PLAN_NAME);
                } else {
                    info!(
                        "🔄️ User {} plan activated: {} for {}",
                        payment.telegram_id, payment.plan_name, payment.duration
                    );
                }
                self.publish_confirmed(PaymentConfirmedEvent::new(payment, new_expiry)).await;
                Ok(CallbackOutcome::Confirmed { upgraded })
            },
        }
    }

    async fn mark_pending(&self, order_id: &OrderId, txid: Option<&str>) -> Result<CallbackOutcome, ReconciliationError> {
        match self.db.mark_payment_pending(order_id, txid.map(String::from)).await? {
            None => Err(ReconciliationError::PaymentNotFound),
            Some(payment) => {
                info!("🔄️ Payment {order_id} is awaiting blockchain confirmation");
                self.publish_pending(PaymentPendingEvent::new(payment)).await;
                Ok(CallbackOutcome::Pending)
            },
        }
    }

    async fn publish_confirmed(&self, event: PaymentConfirmedEvent) {
        for producer in &self.producers.payment_confirmed {
            producer.publish(event.clone()).await;
        }
    }

    async fn publish_pending(&self, event: PaymentPendingEvent) {
        for producer in &self.producers.payment_pending {
            producer.publish(event.clone()).await;
        }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
