use anyhow::{bail, Context, Result};

use crate::render::DateLocale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Process-local, lost on restart. Development and tests only.
    Memory,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub anthropic_api_key: String,
    pub llm_timeout_secs: u64,
    pub typst_bin: String,
    pub typst_timeout_secs: u64,
    pub default_locale: DateLocale,
    pub bcrypt_cost: u32,
    pub cors_origin: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let storage = match optional_env("STORAGE_BACKEND").as_deref() {
            None | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => bail!("STORAGE_BACKEND must be 'postgres' or 'memory', got '{other}'"),
        };

        let database_url = match storage {
            StorageBackend::Postgres => Some(require_env("DATABASE_URL")?),
            StorageBackend::Memory => optional_env("DATABASE_URL"),
        };

        let default_locale = match optional_env("DEFAULT_LOCALE") {
            Some(tag) => tag
                .parse()
                .with_context(|| format!("DEFAULT_LOCALE '{tag}' is not supported"))?,
            None => DateLocale::default(),
        };

        Ok(Config {
            storage,
            database_url,
            jwt_secret: require_env("JWT_SECRET")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 60)?,
            typst_bin: optional_env("TYPST_BIN").unwrap_or_else(|| "typst".to_string()),
            typst_timeout_secs: parse_env("TYPST_TIMEOUT_SECS", 30)?,
            default_locale,
            bcrypt_cost: parse_env("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            cors_origin: optional_env("CORS_ORIGIN"),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number")),
        None => Ok(default),
    }
}
