use std::env;
use std::net::SocketAddr;
use thiserror::Error;
use tracing::info;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://database.db?mode=rwc";
const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Upper bound for any history request, configured or per-request
pub const MAX_HISTORY_LIMIT: u32 = 100;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Where match records are stored
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// Records live in process memory and are lost on restart
    InMemory,
    Sqlite { url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub history_limit: u32,
}

impl Config {
    /// Loads configuration from `HOST`, `PORT`, `DATABASE_URL` and `HISTORY_LIMIT`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let storage = match lookup("DATABASE_URL") {
            Some(url) if url == "memory" => StorageBackend::InMemory,
            Some(url) => StorageBackend::Sqlite { url },
            None => StorageBackend::Sqlite {
                url: DEFAULT_DATABASE_URL.to_string(),
            },
        };

        let history_limit = match lookup("HISTORY_LIMIT") {
            Some(value) => match value.parse::<u32>() {
                Ok(limit) if (1..=MAX_HISTORY_LIMIT).contains(&limit) => limit,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "HISTORY_LIMIT",
                        value,
                    })
                }
            },
            None => DEFAULT_HISTORY_LIMIT,
        };

        let config = Self {
            host,
            port,
            storage,
            history_limit,
        };
        config.log_configuration();
        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                name: "HOST",
                value: self.host.clone(),
            })
    }

    fn log_configuration(&self) {
        let storage = match &self.storage {
            StorageBackend::InMemory => "memory",
            StorageBackend::Sqlite { .. } => "sqlite",
        };
        info!(
            host = %self.host,
            port = self.port,
            storage,
            history_limit = self.history_limit,
            "Configuration loaded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(
            config.storage,
            StorageBackend::Sqlite {
                url: "sqlite://database.db?mode=rwc".to_string()
            }
        );
        assert_eq!(config.history_limit, 10);
    }

    #[test]
    fn test_memory_backend() {
        let config = load(&[("DATABASE_URL", "memory")]).unwrap();
        assert_eq!(config.storage, StorageBackend::InMemory);
    }

    #[test]
    fn test_invalid_port() {
        let result = load(&[("PORT", "not-a-port")]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidValue {
                name: "PORT",
                value: "not-a-port".to_string()
            }
        );
    }

    #[test]
    fn test_history_limit_out_of_range() {
        assert!(load(&[("HISTORY_LIMIT", "0")]).is_err());
        assert!(load(&[("HISTORY_LIMIT", "101")]).is_err());
        assert_eq!(load(&[("HISTORY_LIMIT", "25")]).unwrap().history_limit, 25);
    }

    #[test]
    fn test_socket_addr() {
        let config = load(&[("HOST", "127.0.0.1"), ("PORT", "8080")]).unwrap();
        assert_eq!(config.socket_addr().unwrap().port(), 8080);

        let config = load(&[("HOST", "not a host")]).unwrap();
        assert!(config.socket_addr().is_err());
    }
}
