//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables
//! - CLI arguments (applied by the binary)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GatewatchError, Result};
use crate::inspect::InspectConfig;

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Inspection engine settings
    #[serde(default)]
    pub inspect: InspectConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| GatewatchError::Config(format!("Failed to read config file: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| GatewatchError::Config(format!("Failed to parse config: {e}")))
    }

    /// Apply environment variable overrides.
    ///
    /// `GATEWATCH_PORT` (or the deployment platform's plain `PORT`),
    /// `GATEWATCH_HOST` and `GATEWATCH_MAX_DEPTH` take precedence over
    /// whatever the file carried.
    pub fn overlay_env(mut self) -> Self {
        let port = std::env::var("GATEWATCH_PORT").or_else(|_| std::env::var("PORT"));
        if let Ok(port) = port {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(host) = std::env::var("GATEWATCH_HOST") {
            self.server.host = host;
        }
        if let Ok(depth) = std::env::var("GATEWATCH_MAX_DEPTH") {
            if let Ok(depth) = depth.parse() {
                self.inspect.max_depth = depth;
            }
        }

        self
    }

    /// Load configuration from environment variables alone
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl ServerSettings {
    /// Get the full listen address
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::InspectMode;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.inspect.mode, InspectMode::Full);
        assert_eq!(config.inspect.max_depth, 3);
        assert!(!config.inspect.scan_on_violation);
    }

    #[test]
    fn test_listen_addr() {
        let settings = ServerSettings::default();
        assert_eq!(settings.listen_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [server]
            port = 9090
            host = "0.0.0.0"

            [inspect]
            mode = "signature"
            max_depth = 5
            scan_on_violation = true
            regex_net = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.inspect.mode, InspectMode::Signature);
        assert_eq!(config.inspect.max_depth, 5);
        assert!(config.inspect.scan_on_violation);
        assert!(config.inspect.regex_net);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = r#"
            [server]
            port = 3000
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.inspect.mode, InspectMode::Full);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[inspect]\nmax_depth = 7").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.inspect.max_depth, 7);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_from_missing_file() {
        let result = Config::from_file("/nonexistent/gatewatch.toml");
        assert!(result.is_err());
    }
}
