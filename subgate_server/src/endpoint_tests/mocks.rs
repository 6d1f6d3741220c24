use chrono::Utc;
use mockall::mock;
use subgate_engine::{
    db_types::{OrderId, Payment, PaymentStatus, User},
    ConfirmOutcome,
    PaymentQuery,
    ReconciliationStore,
    StoreError,
};

mock! {
    pub Store {}

    impl ReconciliationStore for Store {
        async fn confirm_payment(&self, order_id: &OrderId, txid: Option<String>) -> Result<ConfirmOutcome, StoreError>;
        async fn mark_payment_pending(&self, order_id: &OrderId, txid: Option<String>) -> Result<Option<Payment>, StoreError>;
    }

    impl PaymentQuery for Store {
        async fn payment_by_order_id(&self, order_id: &OrderId) -> Result<Option<Payment>, StoreError>;
        async fn user_by_telegram_id(&self, telegram_id: &str) -> Result<Option<User>, StoreError>;
    }
}

pub fn sample_payment(order_id: &str, status: PaymentStatus) -> Payment {
    let settled = status != PaymentStatus::Created;
    Payment {
        order_id: OrderId(order_id.to_string()),
        telegram_id: "7000001".to_string(),
        plan_name: "Pro".to_string(),
        duration: "1 month".to_string(),
        is_upgrade: false,
        status,
        txid: settled.then(|| "tx-1".to_string()),
        crypto_amount: "0.5".to_string(),
        crypto_type: "ltc".to_string(),
        confirmed_at: (status == PaymentStatus::Completed).then(Utc::now),
    }
}
