mod api;
mod config;
mod error;

pub mod messages;

pub use api::{Delivery, TelegramApi};
pub use config::TelegramConfig;
pub use error::TelegramApiError;
