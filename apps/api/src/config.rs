//! API server configuration.
//!
//! Layered with the `config` crate, later sources winning:
//!
//! 1. Built-in defaults (`0.0.0.0:5050`, `db.json`)
//! 2. `tiendita.toml` in the working directory, when present
//! 3. `TIENDITA_*` environment variables (`TIENDITA_PORT`, `TIENDITA_DB_PATH`, ...)

use std::path::PathBuf;

use config::{Config, Environment, File, Source};
use serde::Deserialize;

/// Name of the optional configuration file, without extension.
pub const CONFIG_FILE: &str = "tiendita";

/// API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// Snapshot document path
    pub db_path: PathBuf,
}

impl ApiConfig {
    /// Loads defaults, then `tiendita.toml`, then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name(CONFIG_FILE).required(false))
    }

    /// Like [`ApiConfig::load`], reading the file layer from `path`.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::build(File::from(path.into()).required(true))
    }

    fn build(file: impl Source + Send + Sync + 'static) -> Result<Self, ConfigError> {
        let config: ApiConfig = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 5050)?
            .set_default("db_path", "db.json")?
            .add_source(file)
            .add_source(Environment::with_prefix("TIENDITA").try_parsing(true))
            .build()?
            .try_deserialize()?;

        if config.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue("host".to_string()));
        }
        if config.db_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("db_path".to_string()));
        }

        Ok(config)
    }

    /// `host:port`, as given to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file("port = 6060\ndb_path = \"data/market.json\"\n");
        let config = ApiConfig::load_from(file.path()).unwrap();

        assert_eq!(config.port, 6060);
        assert_eq!(config.db_path, PathBuf::from("data/market.json"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.bind_address(), "0.0.0.0:6060");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = toml_file("port = \"not a port\"\n");
        assert!(matches!(ApiConfig::load_from(file.path()), Err(ConfigError::Load(_))));

        let file = toml_file("host = \"  \"\n");
        assert!(matches!(
            ApiConfig::load_from(file.path()),
            Err(ConfigError::InvalidValue(field)) if field == "host"
        ));
    }
}
