use std::env;

use log::*;
use telegram_tools::TelegramConfig;

const DEFAULT_SG_HOST: &str = "127.0.0.1";
const DEFAULT_SG_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://subgate.db";
const DEFAULT_DB_POOL_SIZE: u32 = 10;

/// Everything the process needs for its lifetime, read from the environment exactly once at
/// startup and passed into constructors from there. No other code reads environment variables.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Upper bound on the store connection pool shared across workers.
    pub db_pool_size: u32,
    pub telegram: TelegramConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SG_HOST.to_string(),
            port: DEFAULT_SG_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_pool_size: DEFAULT_DB_POOL_SIZE,
            telegram: TelegramConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("SG_HOST").ok().unwrap_or_else(|| DEFAULT_SG_HOST.into());
        let port = env::var("SG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for SG_PORT. {e} Using the default, {DEFAULT_SG_PORT}, instead.");
                    DEFAULT_SG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_SG_PORT);
        let database_url = env::var("SG_DATABASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ SG_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let db_pool_size = env::var("SG_DB_POOL_SIZE")
            .map(|s| {
                s.parse::<u32>().unwrap_or_else(|e| {
                    warn!("🪛️ Invalid configuration value for SG_DB_POOL_SIZE. {e}");
                    DEFAULT_DB_POOL_SIZE
                })
            })
            .ok()
            .unwrap_or(DEFAULT_DB_POOL_SIZE);
        let telegram = TelegramConfig::new_from_env_or_default();
        Self { host, port, database_url, db_pool_size, telegram }
    }
}
