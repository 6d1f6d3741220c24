use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not reach the Telegram API: {0}")]
    Transport(String),
    #[error("sendMessage failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}
