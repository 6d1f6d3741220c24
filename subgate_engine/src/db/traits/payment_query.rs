use super::StoreError;
use crate::db_types::{OrderId, Payment, User};

/// Read-only lookups against the entitlement store. No method here has side effects.
#[allow(async_fn_in_trait)]
pub trait PaymentQuery {
    async fn payment_by_order_id(&self, order_id: &OrderId) -> Result<Option<Payment>, StoreError>;

    async fn user_by_telegram_id(&self, telegram_id: &str) -> Result<Option<User>, StoreError>;
}
