//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::user::UserRole;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub operator: OperatorConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which station/location backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    /// In-memory seeded service.
    #[default]
    Mock,
    /// Remote JSON API.
    Http,
}

/// Station/location service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub mode: ServiceMode,
    pub base_url: String,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

/// Operator signed in at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub station_id: String,
    pub station_name: String,
    pub station_location: String,
}

/// Export destination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory for exports when the save dialog is disabled.
    pub directory: Option<PathBuf>,
    pub use_save_dialog: bool,
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub toast_seconds: u64,
    pub currency: String,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub to_file: bool,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.mode == ServiceMode::Http && !self.service.base_url.starts_with("http") {
            return Err(ConfigError::Validation(
                "Service URL must start with http:// or https://".to_string(),
            ));
        }
        if self.service.timeout_secs < 1 {
            return Err(ConfigError::Validation(
                "Service timeout must be at least 1 second".to_string(),
            ));
        }
        if self.operator.name.trim().is_empty() {
            return Err(ConfigError::Validation("Operator name cannot be empty".to_string()));
        }
        if self.operator.station_id.trim().is_empty() {
            return Err(ConfigError::Validation("Operator station cannot be empty".to_string()));
        }
        if self.ui.toast_seconds < 1 {
            return Err(ConfigError::Validation(
                "Toast duration must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            mode: ServiceMode::Mock,
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            user_id: "USER-001".to_string(),
            name: "Adams Godfred".to_string(),
            email: "adams@example.com".to_string(),
            role: UserRole::FrontDesk,
            station_id: "STATION-001".to_string(),
            station_name: "Accra Central Station".to_string(),
            station_location: "Accra".to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            use_save_dialog: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_seconds: 4,
            currency: "GHC".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            to_file: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_http_mode_requires_http_url() {
        let mut config = AppConfig::default();
        config.service.mode = ServiceMode::Http;
        config.service.base_url = "ftp://invalid".to_string();
        assert!(config.validate().is_err());

        config.service.base_url = "https://stations.example.com".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mock_mode_ignores_url() {
        let mut config = AppConfig::default();
        config.service.base_url = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_operator() {
        let mut config = AppConfig::default();
        config.operator.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_toast_seconds() {
        let mut config = AppConfig::default();
        config.ui.toast_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_try_load_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.operator.role = UserRole::StationManager;
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => {
                assert_eq!(loaded.operator.role, UserRole::StationManager);
                assert_eq!(loaded.ui.currency, "GHC");
            }
            other => panic!("expected loaded config, got {other:?}"),
        }
    }

    #[test]
    fn test_try_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            AppConfig::try_load(&path),
            ConfigLoadResult::Invalid(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_role_serializes_kebab_case() {
        let content = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(content.contains("role = \"front-desk\""));
    }
}
