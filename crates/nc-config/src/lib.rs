//! # nc-config
//!
//! Layered settings: built-in defaults, optional `config/default` and
//! `config/{NC_ENV}` files, `NC__*` environment variables, then `DATABASE_URL`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigError),

    #[error("no database url configured (set DATABASE_URL or NC__DATABASE__URL)")]
    MissingDatabaseUrl,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Actix worker count; `None` means one per physical core.
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Never log this directly, see `Settings::redacted_database_url`.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Default `env_logger` filter, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Settings {
    /// Loads `.env` and then every configuration source.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("NC_ENV").unwrap_or_else(|_| "development".into());
        let database_url = std::env::var("DATABASE_URL").ok();
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name(&format!("config/{env}")).required(false))
                .add_source(
                    Environment::with_prefix("NC")
                        .prefix_separator("__")
                        .separator("__")
                        .try_parsing(true),
                ),
            database_url,
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        database_url: Option<String>,
    ) -> Result<Self, SettingsError> {
        let settings: Settings = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 9090)?
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_secs", 5)?
            .set_default("database.run_migrations", true)?
            .set_default("log.filter", "info")?
            .set_override_option("database.url", database_url)?
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// The database url with any password replaced by `***`.
    pub fn redacted_database_url(&self) -> String {
        let Some(url) = self.database.url.as_deref() else {
            return "<unset>".into();
        };
        let Some((scheme, rest)) = url.split_once("://") else {
            return url.to_string();
        };
        match rest.split_once('@') {
            Some((credentials, host)) => {
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{scheme}://{user}:***@{host}")
            }
            None => url.to_string(),
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}
