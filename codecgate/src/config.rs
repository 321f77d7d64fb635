//! Configuration types and defaults

use codecgate_core::CodecGateError;
use codecgate_media::{
    CodecCapabilities, CodecCatalog, DeviceProfile, DeviceQuirk, PlatformInfo, QuirkTable,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Failure to load a [`GlobalConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file {path}: {reason}")]
    Io {
        /// File path
        path: String,
        /// Failure reason
        reason: String,
    },

    /// The contents are not a valid configuration
    #[error("Invalid config: {reason}")]
    Parse {
        /// Failure reason
        reason: String,
    },
}

impl From<ConfigError> for CodecGateError {
    fn from(error: ConfigError) -> Self {
        CodecGateError::Configuration {
            reason: error.to_string(),
        }
    }
}

/// Global codecgate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Install a debug-level subscriber at init
    ///
    /// Needs the `diagnostics` feature; without it the flag is ignored and
    /// logging is left to the host's subscriber. Also ignored when a global
    /// subscriber is already installed.
    pub debug_logging: bool,
    /// Platform the device profile is derived from
    pub platform: PlatformInfo,
    /// Extra tone-mapping quirks appended to the built-in table
    pub device_quirks: Vec<DeviceQuirk>,
    /// Catalog contents; empty means the default software catalog
    pub codecs: Vec<CodecCapabilities>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            debug_logging: false,
            platform: PlatformInfo::default(),
            device_quirks: Vec::new(),
            codecs: Vec::new(),
        }
    }
}

impl GlobalConfig {
    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    /// Read and parse a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&contents)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    /// Built-in quirks followed by the configured ones
    pub fn quirk_table(&self) -> QuirkTable {
        let mut table = QuirkTable::builtin();
        table.extend(self.device_quirks.iter().cloned());
        table
    }

    /// Capability catalog described by this configuration
    pub fn catalog(&self) -> CodecCatalog {
        if self.codecs.is_empty() {
            CodecCatalog::with_defaults()
        } else {
            self.codecs.iter().cloned().collect()
        }
    }

    /// Device profile for the configured platform
    pub fn device_profile(&self) -> DeviceProfile {
        DeviceProfile::with_quirks(self.platform.clone(), self.quirk_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GlobalConfig::default();
        assert!(!config.debug_logging);
        assert_eq!(config.quirk_table(), QuirkTable::builtin());
        assert_eq!(config.catalog().len(), CodecCatalog::with_defaults().len());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GlobalConfig::from_json_str(r#"{ "debug_logging": true }"#).unwrap();
        assert!(config.debug_logging);
        assert_eq!(config.platform, PlatformInfo::default());
        assert!(config.codecs.is_empty());
    }

    #[test]
    fn test_configured_quirks_are_appended() {
        let config = GlobalConfig {
            device_quirks: vec![DeviceQuirk::new("Acme", "AX2")],
            ..Default::default()
        };
        let table = config.quirk_table();
        assert_eq!(table.entries().len(), 3);
        assert_eq!(table.entries()[2].manufacturer, "Acme");
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let error = GlobalConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));

        let error: CodecGateError = error.into();
        assert_eq!(error.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let error = GlobalConfig::from_json_file("/nonexistent/codecgate.json").unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
    }
}
