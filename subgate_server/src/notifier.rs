//! Payment notification glue.
//!
//! Subscribes the Telegram client to the engine's payment events. Delivery is fire-and-forget:
//! handlers run on their own tasks, outcomes are logged, and nothing here can ever surface to the
//! webhook caller or roll back a reconciliation.
use chrono::Utc;
use log::*;
use subgate_engine::{
    db_types::Payment,
    events::{EventHooks, PaymentConfirmedEvent, PaymentPendingEvent},
};
use telegram_tools::{
    messages,
    messages::PaymentSummary,
    Delivery,
    TelegramApi,
};

/// Builds the hook set that wires payment events to Telegram notifications.
pub fn notification_hooks(notifier: TelegramApi) -> EventHooks {
    let mut hooks = EventHooks::default();
    let confirmed_notifier = notifier.clone();
    hooks.on_payment_confirmed(move |event: PaymentConfirmedEvent| {
        let notifier = confirmed_notifier.clone();
        Box::pin(async move { notify_confirmed(&notifier, event).await })
    });
    hooks.on_payment_pending(move |event: PaymentPendingEvent| {
        let notifier = notifier.clone();
        Box::pin(async move { notify_pending(&notifier, event).await })
    });
    hooks
}

fn summary(payment: &Payment) -> PaymentSummary {
    PaymentSummary {
        plan_name: payment.plan_name.clone(),
        duration: payment.duration.clone(),
        crypto_amount: payment.crypto_amount.clone(),
        crypto_type: payment.crypto_type.clone(),
        txid: payment.txid.clone().unwrap_or_default(),
    }
}

async fn notify_confirmed(notifier: &TelegramApi, event: PaymentConfirmedEvent) {
    let payment = &event.payment;
    let text = if payment.is_upgrade {
        messages::upgrade_confirmed(&summary(payment), notifier.support_contact())
    } else {
        // A regular confirmation always carries the expiry it just wrote
        let expires = event.new_expiry.unwrap_or_else(Utc::now);
        messages::plan_confirmed(&summary(payment), expires, notifier.support_contact())
    };
    deliver(notifier, &payment.telegram_id, &text, "confirmation").await;
}

async fn notify_pending(notifier: &TelegramApi, event: PaymentPendingEvent) {
    let text = messages::payment_pending(&summary(&event.payment), notifier.support_contact());
    deliver(notifier, &event.payment.telegram_id, &text, "pending").await;
}

async fn deliver(notifier: &TelegramApi, telegram_id: &str, text: &str, kind: &str) {
    match notifier.send_message(telegram_id, text).await {
        Ok(Delivery::Sent) => info!("📨️ {kind} notice sent to user {telegram_id}"),
        Ok(Delivery::Skipped) => {},
        Err(e) => error!("📨️ Could not deliver {kind} notice to user {telegram_id}. {e}"),
    }
}
