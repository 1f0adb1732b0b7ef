// shop/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://plugpoint.sqlite3";

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  /// Insert the demo catalog on startup when the product table is empty.
  pub seed_db: bool,
  pub session_ttl_hours: i64,
  pub featured_product_count: i64,
  pub log_json: bool,
}

impl AppConfig {
  /// Reads configuration from the process environment, after loading `.env` if present.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the configuration from an arbitrary variable source; missing keys take defaults.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = parse_var("SERVER_PORT", &get_or("SERVER_PORT", "8000"))?;
    let database_url = get_or("DATABASE_URL", DEFAULT_DATABASE_URL);
    let seed_db = parse_var("SEED_DB", &get_or("SEED_DB", "false"))?;
    let session_ttl_hours: i64 = parse_var("SESSION_TTL_HOURS", &get_or("SESSION_TTL_HOURS", "336"))?;
    let featured_product_count: i64 = parse_var("FEATURED_PRODUCT_COUNT", &get_or("FEATURED_PRODUCT_COUNT", "4"))?;
    let log_json = parse_var("LOG_JSON", &get_or("LOG_JSON", "false"))?;

    if session_ttl_hours <= 0 {
      return Err(AppError::Config("SESSION_TTL_HOURS must be positive".to_string()));
    }
    if featured_product_count < 0 {
      return Err(AppError::Config("FEATURED_PRODUCT_COUNT cannot be negative".to_string()));
    }

    Ok(Self {
      server_host,
      server_port,
      database_url,
      seed_db,
      session_ttl_hours,
      featured_product_count,
      log_json,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .trim()
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {name} value '{raw}': {e}")))
}
