//! # Subgate server
//! This crate hosts the HTTP boundary of the payment webhook service. It is responsible for:
//! Listening for incoming payment-status callbacks from the crypto payment gateway.
//! Extracting the callback fields and handing them to the reconciliation engine.
//! Relaying payment notifications to the user's Telegram chat, best-effort.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a liveness payload.
//! * `/webhook`: The callback route the payment gateway posts status reports to (any method).
//! * `/payment/{order_id}`: Read-only payment status lookup.
//! * `/test-webhook`: A development convenience that simulates a confirmed callback.

pub mod config;
pub mod data_objects;
pub mod errors;
pub mod notifier;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
