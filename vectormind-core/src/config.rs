use std::collections::HashMap;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct VectorMindConfig {
    pub service: ServiceConfig,
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    pub cors_allow_any_origin: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Completion provider settings. `api_key` being `None` puts every endpoint
/// into mock mode.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl ProviderConfig {
    pub fn is_live(&self) -> bool {
        self.api_key.is_some()
    }
}

pub const DEFAULT_SERVICE_NAME: &str = "VectorMind AI API";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://vectormind.db";

impl VectorMindConfig {
    /// Load from defaults, the optional TOML file at `path`, and the process
    /// environment.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Same as [`VectorMindConfig::load`] but reads variables from `env`
    /// instead of the process environment.
    pub fn load_with_env(path: &str, env: HashMap<String, String>) -> Result<Self, ConfigError> {
        let well_known = |key: &str| env.get(key).cloned();

        let s = Config::builder()
            .set_default("service.name", DEFAULT_SERVICE_NAME)?
            .set_default("http.host", "0.0.0.0")?
            .set_default("http.port", 8000_i64)?
            .set_default("http.cors_allow_any_origin", true)?
            .set_default("database.url", DEFAULT_DATABASE_URL)?
            .set_default("database.max_connections", 5_i64)?
            .set_default("provider.model", DEFAULT_MODEL)?
            .set_default("provider.base_url", DEFAULT_BASE_URL)?
            .set_default("provider.timeout_seconds", 60_i64)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("VECTORMIND")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.clone())),
            )
            .set_override_option("provider.api_key", well_known("OPENAI_API_KEY"))?
            .set_override_option("provider.model", well_known("OPENAI_MODEL"))?
            .set_override_option("provider.base_url", well_known("OPENAI_BASE_URL"))?
            .set_override_option("database.url", well_known("DATABASE_URL"))?
            .set_override_option("http.port", well_known("PORT"))?
            .build()?;

        let mut config: Self = s.try_deserialize()?;
        config.provider.api_key = config
            .provider
            .api_key
            .take()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Ok(config)
    }
}
