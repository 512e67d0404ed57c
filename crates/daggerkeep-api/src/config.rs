//! Server configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use daggerkeep_generation::infrastructure::http_text_generator::ProviderConfig;

use crate::error::AppError;

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory that holds uploaded file contents.
    pub blob_root: PathBuf,
    /// AI provider endpoints and models.
    pub providers: ProviderConfig,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// everything except `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".to_owned())
        })?;
        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };

        let defaults = ProviderConfig::default();
        let max_tokens = match lookup("GENERATION_MAX_TOKENS") {
            Some(value) => value.parse().map_err(|e| {
                AppError::Config(format!("GENERATION_MAX_TOKENS must be a valid u32: {e}"))
            })?,
            None => defaults.max_tokens,
        };
        let providers = ProviderConfig {
            anthropic_base_url: lookup("ANTHROPIC_BASE_URL").unwrap_or(defaults.anthropic_base_url),
            anthropic_model: lookup("ANTHROPIC_MODEL").unwrap_or(defaults.anthropic_model),
            openai_base_url: lookup("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            openai_model: lookup("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            max_tokens,
        };

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port,
            blob_root: lookup("BLOB_ROOT").map_or_else(|| PathBuf::from("./data/blobs"), PathBuf::from),
            providers,
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.trim().is_empty()),
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST` and `PORT` do not form an address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
