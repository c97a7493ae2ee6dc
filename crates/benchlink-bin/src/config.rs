// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Demo configuration loading.
//!
//! Every field defaults to the built-in demo values, so a missing config file
//! is not an error. Sources are applied in this order, later ones winning:
//!
//! 1. Built-in defaults
//! 2. The config file (`.yaml`/`.yml` or `.toml`)
//! 3. `BENCHLINK_*` environment variables
//! 4. Command-line flags (applied by the commands)
//!
//! ```yaml
//! opcua:
//!   endpoint: "opc.tcp://demo-opcua-server:4840"
//!   node: "ns=2;s=Demo.Static.Scalar.Int32"
//!   simulation:
//!     connect_latency_ms: 100
//!     placeholder_value: 42
//! platepusher:
//!   base_url: "http://demo-platepusher.local/api"
//!   timeout_ms: 2000
//!   sites: ["A1", "B4"]
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use benchlink_opcua::{DeviceEndpoint, NodeId, SimulationConfig};
use benchlink_platepusher::PlatePusherConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default environment variable prefix.
pub const ENV_PREFIX: &str = "BENCHLINK";

// =============================================================================
// ConfigError
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The given config file does not exist.
    #[error("Configuration file not found: {}", path.display())]
    NotFound {
        /// Requested path.
        path: PathBuf,
    },

    /// The file could not be read.
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid for its format.
    #[error("Failed to parse config file '{}': {message}", path.display())]
    Parse {
        /// Path to the file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The file extension is not a known format.
    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat {
        /// The offending extension.
        extension: String,
    },

    /// A value is out of range.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        /// Dotted field path.
        field: String,
        /// What is wrong.
        message: String,
    },
}

impl ConfigError {
    /// Creates a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A Result type with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Schema
// =============================================================================

/// Top-level demo configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// OPC UA session demo settings.
    pub opcua: OpcUaSection,
    /// Plate pusher demo settings.
    pub platepusher: PlatePusherSection,
}

/// OPC UA session demo settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpcUaSection {
    /// Endpoint to connect to.
    pub endpoint: String,
    /// Node read and written by the demo.
    pub node: String,
    /// Simulated transport behavior.
    pub simulation: SimulationConfig,
}

impl Default for OpcUaSection {
    fn default() -> Self {
        Self {
            endpoint: "opc.tcp://demo-opcua-server:4840".to_string(),
            node: "ns=2;s=Demo.Static.Scalar.Int32".to_string(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl OpcUaSection {
    /// Returns the endpoint as a typed value.
    pub fn endpoint(&self) -> DeviceEndpoint {
        DeviceEndpoint::new(self.endpoint.as_str())
    }

    /// Returns the node as a typed value.
    pub fn node(&self) -> NodeId {
        NodeId::new(self.node.as_str())
    }
}

/// Plate pusher demo settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatePusherSection {
    /// Base URL of the device API.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Sites visited after homing.
    pub sites: Vec<String>,
}

impl Default for PlatePusherSection {
    fn default() -> Self {
        Self {
            base_url: "http://demo-platepusher.local/api".to_string(),
            timeout_ms: 2000,
            sites: vec!["A1".to_string(), "B4".to_string()],
        }
    }
}

impl PlatePusherSection {
    /// Builds the client configuration.
    pub fn client_config(&self) -> PlatePusherConfig {
        PlatePusherConfig::new(self.base_url.as_str())
            .with_timeout(Duration::from_millis(self.timeout_ms))
    }
}

impl DemoConfig {
    /// Checks value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        self.opcua.validate()?;
        self.platepusher.validate()
    }
}

impl OpcUaSection {
    /// Checks that the endpoint is set.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::validation("opcua.endpoint", "must not be empty"));
        }
        Ok(())
    }
}

impl PlatePusherSection {
    /// Checks that the base URL is set and the timeout is positive.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::validation(
                "platepusher.base_url",
                "must not be empty",
            ));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::validation(
                "platepusher.timeout_ms",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// ConfigFormat
// =============================================================================

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML.
    Yaml,
    /// TOML.
    Toml,
}

impl ConfigFormat {
    /// Detects the format from the file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(Self::Yaml)
            }
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) => Err(ConfigError::UnsupportedFormat {
                extension: ext.to_string(),
            }),
            None => Err(ConfigError::UnsupportedFormat {
                extension: "(no extension)".to_string(),
            }),
        }
    }
}

// =============================================================================
// ConfigLoader
// =============================================================================

/// Loads a [`DemoConfig`] from an optional file plus environment overrides.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_prefix: String,
    use_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader reading `BENCHLINK_*` overrides.
    pub fn new() -> Self {
        Self {
            env_prefix: ENV_PREFIX.to_string(),
            use_env: true,
        }
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Enables or disables environment overrides.
    pub fn with_env_vars(mut self, enabled: bool) -> Self {
        self.use_env = enabled;
        self
    }

    /// Loads the configuration.
    ///
    /// With `path == None` the defaults are used as the base.
    pub fn load(&self, path: Option<&Path>) -> ConfigResult<DemoConfig> {
        let mut config = match path {
            Some(path) => self.load_file(path)?,
            None => DemoConfig::default(),
        };

        if self.use_env {
            self.apply_overrides(&mut config, |key| env::var(key).ok());
        }

        config.validate()?;
        Ok(config)
    }

    /// Parses `content` in the given format without touching the environment.
    pub fn load_from_str(&self, content: &str, format: ConfigFormat) -> ConfigResult<DemoConfig> {
        let config = parse_str(content, format, Path::new("<string>"))?;
        config.validate()?;
        Ok(config)
    }

    fn load_file(&self, path: &Path) -> ConfigResult<DemoConfig> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        parse_str(&content, format, path)
    }

    /// Applies `<PREFIX>_OPCUA_ENDPOINT` and `<PREFIX>_PLATEPUSHER_BASE_URL`.
    fn apply_overrides(&self, config: &mut DemoConfig, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(&format!("{}_OPCUA_ENDPOINT", self.env_prefix)) {
            config.opcua.endpoint = value;
        }
        if let Some(value) = lookup(&format!("{}_PLATEPUSHER_BASE_URL", self.env_prefix)) {
            config.platepusher.base_url = value;
        }
    }
}

fn parse_str(content: &str, format: ConfigFormat, path: &Path) -> ConfigResult<DemoConfig> {
    let parsed = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn loader() -> ConfigLoader {
        ConfigLoader::new().with_env_vars(false)
    }

    #[test]
    fn test_defaults_without_file() {
        let config = loader().load(None).unwrap();
        assert_eq!(config.opcua.endpoint, "opc.tcp://demo-opcua-server:4840");
        assert_eq!(config.opcua.simulation.placeholder_value, 42);
        assert_eq!(config.platepusher.sites, vec!["A1", "B4"]);
        assert_eq!(
            config.platepusher.client_config().timeout(),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn test_load_yaml_partial() {
        let file = write_temp(
            ".yaml",
            r#"
opcua:
  node: "ns=3;s=Bench.Counter"
  simulation:
    read_latency_ms: 5
platepusher:
  sites: ["C2"]
"#,
        );

        let config = loader().load(Some(file.path())).unwrap();
        assert_eq!(config.opcua.node, "ns=3;s=Bench.Counter");
        assert_eq!(config.opcua.endpoint, "opc.tcp://demo-opcua-server:4840");
        assert_eq!(config.opcua.simulation.read_latency, Duration::from_millis(5));
        assert_eq!(config.opcua.simulation.connect_latency, Duration::from_millis(100));
        assert_eq!(config.platepusher.sites, vec!["C2"]);
    }

    #[test]
    fn test_load_toml() {
        let file = write_temp(
            ".toml",
            r#"
[platepusher]
base_url = "http://bench.local/api/"
timeout_ms = 500
"#,
        );

        let config = loader().load(Some(file.path())).unwrap();
        assert_eq!(config.platepusher.base_url, "http://bench.local/api/");
        assert_eq!(
            config.platepusher.client_config().timeout(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_missing_file() {
        let err = loader()
            .load(Some(Path::new("/nonexistent/benchlink.yaml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_unsupported_format() {
        let file = write_temp(".ini", "opcua=1");
        let err = loader().load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { ref extension } if extension == "ini"));
    }

    #[test]
    fn test_parse_error() {
        let file = write_temp(".yaml", "opcua: 42");
        let err = loader().load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validation() {
        let err = loader()
            .load_from_str("platepusher:\n  timeout_ms: 0\n", ConfigFormat::Yaml)
            .unwrap_err();
        assert!(err.to_string().contains("platepusher.timeout_ms"));

        let err = loader()
            .load_from_str("[opcua]\nendpoint = \"\"\n", ConfigFormat::Toml)
            .unwrap_err();
        assert!(err.to_string().contains("opcua.endpoint"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("BENCH_OPCUA_ENDPOINT", "opc.tcp://override:4840"),
            ("BENCH_PLATEPUSHER_BASE_URL", "http://override/api"),
        ]);
        let loader = ConfigLoader::new().with_env_prefix("BENCH");
        let mut config = DemoConfig::default();

        loader.apply_overrides(&mut config, |key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.opcua.endpoint, "opc.tcp://override:4840");
        assert_eq!(config.platepusher.base_url, "http://override/api");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.yml")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.YAML")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")).unwrap(), ConfigFormat::Toml);
        assert!(ConfigFormat::from_path(Path::new("a")).is_err());
    }
}
