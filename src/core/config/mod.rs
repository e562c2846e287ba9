//! Runtime configuration from the environment (and `.env`, when present).

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::warn;

use crate::domain::common::service::pagination::PageSize;
use crate::domain::comparison::service::DEFAULT_TOP_DRIVERS_LIMIT;

pub const ENV_HOST: &str = "RUSTCOST_INSIGHTS_HOST";
pub const ENV_PORT: &str = "RUSTCOST_INSIGHTS_PORT";
pub const ENV_LOG_DIR: &str = "RUSTCOST_INSIGHTS_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "RUSTCOST_INSIGHTS_LOG_LEVEL";
pub const ENV_DEFAULT_PAGE_SIZE: &str = "RUSTCOST_INSIGHTS_DEFAULT_PAGE_SIZE";
pub const ENV_TOP_DRIVERS_LIMIT: &str = "RUSTCOST_INSIGHTS_TOP_DRIVERS_LIMIT";
pub const ENV_DEBUG_MODE: &str = "RUSTCOST_DEBUG_MODE";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_dir: String,
    pub log_level: String,
    pub default_page_size: PageSize,
    pub top_drivers_limit: usize,
    pub debug_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_dir: "logs".to_string(),
            log_level: "info".to_string(),
            default_page_size: PageSize::DEFAULT,
            top_drivers_limit: DEFAULT_TOP_DRIVERS_LIMIT,
            debug_mode: false,
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Self {
        // A missing .env file is the normal case in-cluster.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Bad values keep their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parse_or(&lookup, ENV_PORT, defaults.port);
        let top_drivers_limit = parse_or(&lookup, ENV_TOP_DRIVERS_LIMIT, defaults.top_drivers_limit);

        let default_page_size = lookup(ENV_DEFAULT_PAGE_SIZE)
            .and_then(|raw| match raw.trim().parse::<usize>().map(PageSize::try_from) {
                Ok(Ok(size)) => Some(size),
                _ => {
                    warn!("Ignoring {}={:?}: expected 10, 25 or 50", ENV_DEFAULT_PAGE_SIZE, raw);
                    None
                }
            })
            .unwrap_or(defaults.default_page_size);

        let debug_mode = lookup(ENV_DEBUG_MODE)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            host: lookup(ENV_HOST).unwrap_or(defaults.host),
            port,
            log_dir: lookup(ENV_LOG_DIR).unwrap_or(defaults.log_dir),
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            default_page_size,
            top_drivers_limit,
            debug_mode,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {}={:?}: not a valid value", key, raw);
            default
        }),
        None => default,
    }
}
