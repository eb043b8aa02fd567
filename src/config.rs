use std::{env, net::SocketAddr, path::PathBuf};

use chrono::format::{Item, StrftimeItems};

use crate::error::AppError;

pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub static_root: PathBuf,
    pub date_format: String,
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_root: PathBuf::from("static"),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let static_root = env::var("STATIC_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let date_format =
            env::var("DATE_FORMAT").unwrap_or_else(|_| DEFAULT_DATE_FORMAT.to_string());
        check_date_format(&date_format)?;

        let currency_symbol = env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "$".to_string());

        Ok(Self {
            listen_addr,
            static_root,
            date_format,
            currency_symbol,
        })
    }
}

/// chrono panics when rendering a broken pattern, so reject it at startup.
pub fn check_date_format(pattern: &str) -> Result<(), AppError> {
    if pattern.trim().is_empty() {
        return Err(AppError::Config("DATE_FORMAT must not be empty".into()));
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(AppError::Config(format!(
            "invalid DATE_FORMAT: {pattern:?}"
        )));
    }
    Ok(())
}
