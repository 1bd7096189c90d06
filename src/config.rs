use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::notification::EmailSettings;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,

    // Rate limiting
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,
    pub email: EmailSettings,
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    or_default(key, default)
        .parse()
        .with_context(|| format!("{key} is not a valid value"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = EmailSettings::default();
        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            rate_protected_per_min: parsed("RATE_PROTECTED_PER_MIN", "1000")?,
            api_prefix: or_default("API_PREFIX", "/api"),
            log_dir: or_default("LOG_DIR", "logs"),
            email: EmailSettings {
                from_address: or_default("EMAIL_FROM_ADDRESS", &defaults.from_address),
                from_name: or_default("EMAIL_FROM_NAME", &defaults.from_name),
                leave_request_recipient: or_default(
                    "LEAVE_REQUEST_RECIPIENT",
                    &defaults.leave_request_recipient,
                ),
            },
        })
    }
}
