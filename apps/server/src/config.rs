use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::{bail, Context};
use capex_storage_sqlite::StorageEngine;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_engine: StorageEngine,
    pub rates_base_url: String,
    pub rates_api_key: String,
    pub rates_timeout: Duration,
    pub request_timeout: Duration,
    pub cors_allow: Vec<String>,
    pub api_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_engine: StorageEngine::Memory,
            rates_base_url: "https://v6.exchangerate-api.com/v6".to_string(),
            rates_api_key: String::new(),
            rates_timeout: Duration::from_millis(10_000),
            request_timeout: Duration::from_millis(30_000),
            cors_allow: vec!["*".to_string()],
            api_prefix: "/api".to_string(),
        }
    }
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn millis(name: &str, default: Duration) -> anyhow::Result<Duration> {
    match var(name) {
        Some(raw) => {
            let ms: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", name, raw))?;
            Ok(Duration::from_millis(ms))
        }
        None => Ok(default),
    }
}

impl Config {
    /// Reads `.env` and the process environment once; unset variables keep
    /// their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match var("CAPEX_LISTEN_ADDR") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid CAPEX_LISTEN_ADDR: {}", raw))?,
            None => defaults.listen_addr,
        };

        let db_path = var("CAPEX_DB_PATH").unwrap_or_else(|| "./db/capex.db".into());
        let db_engine = match var("CAPEX_DB_ENGINE")
            .unwrap_or_else(|| "memory".into())
            .to_ascii_lowercase()
            .as_str()
        {
            "memory" => StorageEngine::Memory,
            "file" => StorageEngine::File(PathBuf::from(db_path)),
            other => bail!("Invalid CAPEX_DB_ENGINE: {} (expected memory or file)", other),
        };

        let cors_allow = var("CAPEX_CORS_ALLOW_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_allow);

        Ok(Self {
            listen_addr,
            db_engine,
            rates_base_url: var("CAPEX_RATES_BASE_URL").unwrap_or(defaults.rates_base_url),
            rates_api_key: var("CAPEX_RATES_API_KEY").unwrap_or(defaults.rates_api_key),
            rates_timeout: millis("CAPEX_RATES_TIMEOUT_MS", defaults.rates_timeout)?,
            request_timeout: millis("CAPEX_REQUEST_TIMEOUT_MS", defaults.request_timeout)?,
            cors_allow,
            api_prefix: var("CAPEX_API_PREFIX").unwrap_or(defaults.api_prefix),
        })
    }
}
