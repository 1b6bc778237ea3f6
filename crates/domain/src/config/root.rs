use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverSettings;
use crate::NameServerSpec;

/// Main configuration structure for Ferrous Resolve
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-resolve.toml in current directory
    /// 3. /etc/ferrous-resolve/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("ferrous-resolve.toml").exists() {
            Self::from_file("ferrous-resolve.toml")?
        } else if std::path::Path::new("/etc/ferrous-resolve/config.toml").exists() {
            Self::from_file("/etc/ferrous-resolve/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(server) = overrides.name_server {
            self.resolver.name_server = server;
        }
        if let Some(port) = overrides.port {
            self.resolver.port = port;
        }
        if let Some(depth) = overrides.max_cname_indirection {
            self.resolver.max_cname_indirection = depth;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let resolver = &self.resolver;

        if resolver.port == 0 {
            return Err(ConfigError::Validation("Resolver port cannot be 0".to_string()));
        }
        if resolver.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than 0".to_string(),
            ));
        }
        if resolver.max_query_attempts == 0 {
            return Err(ConfigError::Validation(
                "At least one query attempt is required".to_string(),
            ));
        }
        if resolver.max_iterations == 0 {
            return Err(ConfigError::Validation(
                "Iteration ceiling must be greater than 0".to_string(),
            ));
        }
        resolver
            .name_server
            .parse::<NameServerSpec>()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub name_server: Option<String>,
    pub port: Option<u16>,
    pub max_cname_indirection: Option<usize>,
    pub log_level: Option<String>,
}
