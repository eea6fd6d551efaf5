//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use crate::export::CsvStyle;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote records gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Endpoint serving both the record read and the write actions
    #[serde(default = "default_gateway_url")]
    pub url: String,

    /// Per-request timeout. `0` disables the timeout.
    #[serde(default = "default_gateway_timeout")]
    pub request_timeout_secs: u64,
}

fn default_gateway_url() -> String {
    "http://localhost:8082/api/v1/records".to_string()
}

fn default_gateway_timeout() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: default_gateway_url(),
            request_timeout_secs: default_gateway_timeout(),
        }
    }
}

/// Proxy API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:8084".to_string(),
        "http://127.0.0.1:8084".to_string(),
    ]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether `url` would be answered by this server
    pub fn serves(&self, url: &str) -> bool {
        let Ok(url) = reqwest::Url::parse(url) else {
            return false;
        };
        let Some(host) = url.host_str() else {
            return false;
        };
        if url.port_or_known_default() != Some(self.port) {
            return false;
        }

        let host = host.trim_start_matches('[').trim_end_matches(']');
        host.eq_ignore_ascii_case(&self.host) || (is_local(host) && is_local(&self.host))
    }
}

/// Loopback names and the wildcard bind address
fn is_local(host: &str) -> bool {
    host.eq_ignore_ascii_case("localhost")
        || host
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback() || ip.is_unspecified())
            .unwrap_or(false)
}

/// CSV export configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub style: CsvStyle,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("scoreboard").join("config.toml")),
            Some(PathBuf::from("/etc/scoreboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Reject a gateway URL that resolves to the proxy itself, which would
    /// forward every request back to itself until it times out
    pub fn check_proxy_gateway(&self) -> Result<(), ConfigError> {
        if self.api.serves(&self.gateway.url) {
            return Err(ConfigError::GatewayLoop {
                url: self.gateway.url.clone(),
                addr: self.api.addr(),
            });
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Gateway overrides
        if let Some(url) = lookup("SCOREBOARD_GATEWAY_URL") {
            self.gateway.url = url;
        }
        if let Some(secs) = lookup("SCOREBOARD_GATEWAY_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.gateway.request_timeout_secs = s;
            }
        }

        // API overrides
        if let Some(host) = lookup("SCOREBOARD_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("SCOREBOARD_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Export overrides
        if let Some(style) = lookup("SCOREBOARD_EXPORT_STYLE") {
            match style.parse() {
                Ok(s) => self.export.style = s,
                Err(e) => tracing::warn!("Ignoring SCOREBOARD_EXPORT_STYLE: {}", e),
            }
        }

        // Logging overrides
        if let Some(level) = lookup("SCOREBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SCOREBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Gateway URL {url} points at this proxy ({addr}); set SCOREBOARD_GATEWAY_URL to the remote endpoint")]
    GatewayLoop { url: String, addr: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Scoreboard Configuration
#
# Environment variables override these settings:
# - SCOREBOARD_GATEWAY_URL
# - SCOREBOARD_GATEWAY_TIMEOUT_SECS
# - SCOREBOARD_API_HOST
# - SCOREBOARD_API_PORT
# - SCOREBOARD_EXPORT_STYLE
# - SCOREBOARD_LOG_LEVEL
# - SCOREBOARD_LOG_FORMAT

[gateway]
# Records endpoint (GET returns every record, POST carries an action).
# The default targets a local scoreboard-api; the proxy itself needs the
# remote endpoint here and refuses to start while this points at itself.
url = "http://localhost:8082/api/v1/records"

# Request timeout in seconds (0 = wait forever)
request_timeout_secs = 30

[api]
# Proxy API host
host = "0.0.0.0"

# Proxy API port
port = 8082

# Allowed CORS origins
cors_origins = ["http://localhost:8084", "http://127.0.0.1:8084"]

[export]
# verbatim: free text written as-is
# rfc4180: fields quoted when they contain commas, quotes or newlines
style = "verbatim"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();

        assert_eq!(config.gateway.url, "http://localhost:8082/api/v1/records");
        assert_eq!(config.gateway.request_timeout_secs, 30);
        assert_eq!(config.api.port, 8082);
        assert_eq!(config.export.style, CsvStyle::Verbatim);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gateway]\nurl = \"https://example.test/exec\"").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.gateway.url, "https://example.test/exec");
        assert_eq!(config.gateway.request_timeout_secs, 30);
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn test_parse_error_names_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gateway\nurl = 3").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SCOREBOARD_GATEWAY_URL", "https://script.example/exec"),
            ("SCOREBOARD_API_PORT", "9000"),
            ("SCOREBOARD_EXPORT_STYLE", "rfc4180"),
            ("SCOREBOARD_GATEWAY_TIMEOUT_SECS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.gateway.url, "https://script.example/exec");
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.export.style, CsvStyle::Rfc4180);
        assert_eq!(config.gateway.request_timeout_secs, 30);
    }

    #[test]
    fn test_default_gateway_loops_to_proxy() {
        let config = Config::default();
        assert!(matches!(
            config.check_proxy_gateway(),
            Err(ConfigError::GatewayLoop { .. })
        ));
    }

    #[test]
    fn test_loopback_spellings_are_detected() {
        let api = ApiConfig::default();
        assert!(api.serves("http://127.0.0.1:8082/api/v1/records"));
        assert!(api.serves("http://[::1]:8082/exec"));
        assert!(api.serves("http://LOCALHOST:8082/"));
        assert!(!api.serves("http://localhost:9000/api/v1/records"));
        assert!(!api.serves("https://script.example/exec"));
        assert!(!api.serves("not a url"));
    }

    #[test]
    fn test_remote_gateway_passes_check() {
        let mut config = Config::default();
        config.gateway.url = "https://script.example/macros/exec".to_string();
        assert!(config.check_proxy_gateway().is_ok());

        config.api.port = 443;
        config.api.host = "script.example".to_string();
        assert!(config.check_proxy_gateway().is_err());
    }
}
