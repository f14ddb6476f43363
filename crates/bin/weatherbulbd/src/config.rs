//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `weatherbulb.toml` in the working directory. Every field except
//! the weather API key has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use serde::Deserialize;

use weatherbulb_adapter_openweather::OpenWeatherConfig;
use weatherbulb_adapter_smartthings::SmartThingsConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Weather provider settings.
    pub openweather: OpenWeatherConfig,
    /// Device cloud settings.
    pub smartthings: SmartThingsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `weatherbulb.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is not usable.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("weatherbulb.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("WEATHERBULB_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("WEATHERBULB_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("WEATHERBULB_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("WEATHERBULB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("WEATHER_API_KEY") {
            self.openweather.api_key = val;
        }
        if let Some(val) = var("SMARTTHINGS_API_URL") {
            self.smartthings.api_url = val;
        }
        if let Some(val) = var("SMARTTHINGS_PUBLIC_KEY_PATH") {
            self.smartthings.public_key_path = Some(val.into());
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.openweather.api_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "weather API key must be set (WEATHER_API_KEY)".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3005,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "weatherbulbd=info,weatherbulb=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn with_key() -> Config {
        let mut config = Config::default();
        config.openweather.api_key = "secret".to_string();
        config
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3005);
        assert_eq!(
            config.logging.filter,
            "weatherbulbd=info,weatherbulb=info,tower_http=debug"
        );
        assert_eq!(config.openweather.units, "imperial");
        assert_eq!(config.smartthings.api_url, "https://api.smartthings.com/v1");
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3005);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [logging]
            filter = 'debug'

            [openweather]
            base_url = 'http://localhost:8081'
            api_key = 'secret'
            units = 'imperial'
            timeout_secs = 5

            [smartthings]
            api_url = 'http://localhost:8082'
            timeout_secs = 2
            public_key_path = '/etc/weatherbulb/smartthings_rsa.pub'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.openweather.base_url, "http://localhost:8081");
        assert_eq!(config.openweather.api_key, "secret");
        assert_eq!(config.openweather.timeout_secs, 5);
        assert_eq!(config.smartthings.api_url, "http://localhost:8082");
        assert_eq!(config.smartthings.timeout_secs, 2);
        assert_eq!(
            config.smartthings.public_key_path.as_deref(),
            Some(std::path::Path::new("/etc/weatherbulb/smartthings_rsa.pub"))
        );
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3005);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = with_key();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_missing_api_key() {
        let err = Config::default().validate().unwrap_err();
        assert!(err.to_string().contains("WEATHER_API_KEY"));
    }

    #[test]
    fn should_accept_valid_configuration() {
        assert!(with_key().validate().is_ok());
    }

    #[test]
    fn should_apply_environment_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("WEATHERBULB_HOST", "127.0.0.1"),
            ("WEATHERBULB_PORT", "8080"),
            ("WEATHERBULB_LOG", "debug"),
            ("WEATHER_API_KEY", "from-env"),
            ("SMARTTHINGS_API_URL", "http://localhost:9999"),
            ("SMARTTHINGS_PUBLIC_KEY_PATH", "key.pem"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.openweather.api_key, "from-env");
        assert_eq!(config.smartthings.api_url, "http://localhost:9999");
        assert_eq!(
            config.smartthings.public_key_path.as_deref(),
            Some(std::path::Path::new("key.pem"))
        );
    }

    #[test]
    fn should_prefer_bind_over_host_and_port() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("WEATHERBULB_PORT", "8080"),
            ("WEATHERBULB_BIND", "10.0.0.2:4000"),
        ]));
        assert_eq!(config.bind_addr(), "10.0.0.2:4000");
    }

    #[test]
    fn should_prefer_rust_log_over_weatherbulb_log() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("WEATHERBULB_LOG", "info"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparseable_port_override() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("WEATHERBULB_PORT", "not-a-port")]));
        assert_eq!(config.server.port, 3005);
    }

    #[test]
    fn should_format_bind_addr() {
        assert_eq!(Config::default().bind_addr(), "0.0.0.0:3005");
    }
}
