use thiserror::Error;

use crate::db::traits::StoreError;

/// Failures a payment callback can produce. The display strings are part of the webhook
/// contract: the gateway sees them verbatim in 400 responses.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    #[error("Payment not found")]
    PaymentNotFound,
    #[error("Invalid payment status")]
    InvalidPaymentStatus,
    #[error("Database error: {0}")]
    DatabaseError(#[from] StoreError),
}
