use chrono::{DateTime, Utc};

use crate::db_types::Payment;

/// Emitted after a payment reaches `completed` and the user's entitlement has been updated.
#[derive(Debug, Clone)]
pub struct PaymentConfirmedEvent {
    /// The payment row as it stands after the confirm transition.
    pub payment: Payment,
    /// The entitlement expiry that was written. `None` for upgrades, which leave expiry
    /// untouched.
    pub new_expiry: Option<DateTime<Utc>>,
}

impl PaymentConfirmedEvent {
    pub fn new(payment: Payment, new_expiry: Option<DateTime<Utc>>) -> Self {
        Self { payment, new_expiry }
    }
}

/// Emitted when the gateway reports a transaction that is still gathering confirmations.
#[derive(Debug, Clone)]
pub struct PaymentPendingEvent {
    pub payment: Payment,
}

impl PaymentPendingEvent {
    pub fn new(payment: Payment) -> Self {
        Self { payment }
    }
}
