//! Subgate payment engine
//!
//! Core logic for reconciling cryptocurrency payment-gateway callbacks against stored payment
//! records and the subscription entitlements they purchase. The library is split into two main
//! sections:
//! 1. Database management and control ([`SqliteStore`] and the per-table query modules behind it).
//!    You should never need to touch the database directly; use the public API instead. The
//!    exception is the row types, which live in [`db_types`] and are public.
//! 2. The reconciliation API ([`ReconciliationApi`]). It is generic over the store traits
//!    ([`ReconciliationStore`] and [`PaymentQuery`]) so that servers and tests can supply their
//!    own backends.
//!
//! The engine emits events when payments change state. Subscribers hook in via
//! [`events::EventHooks`] and run on their own tasks, so a slow or failing subscriber never holds
//! up callback processing. This is how payment notifications stay best-effort.
mod api;
mod db;

pub mod db_types;
pub mod events;

pub use api::{CallbackOutcome, ReconciliationApi, ReconciliationError};
pub use db::{
    sqlite::SqliteStore,
    traits::{ConfirmOutcome, PaymentQuery, ReconciliationStore, StoreError},
};
