mod payment_query;
mod reconciliation;

pub use payment_query::PaymentQuery;
pub use reconciliation::{ConfirmOutcome, ReconciliationStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection error: {0}")]
    Driver(#[from] sqlx::Error),
    #[error("Database query error: {0}")]
    Query(String),
}
