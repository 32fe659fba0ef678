//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use crate::config::error::ConfigError;
use crate::config::settings::{
    AiConfig, AutomationConfig, BoardsConfig, DatabaseConfig, FileSettings, LoggerSettings,
    ServerConfig, Settings, UploadsConfig,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    /// - Keep-alive timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.keep_alive_timeout == 0 {
            return Err(ConfigError::validation(
                "server.keep_alive_timeout",
                "Keep-alive timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must not be empty and must look like a PostgreSQL URL
    /// - Max connections must be greater than 0
    /// - Min connections must be greater than 0 and not exceed max
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Please specify a valid database connection string.",
            ));
        }

        if !self.is_valid_database_url() {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        Ok(())
    }

    fn is_valid_database_url(&self) -> bool {
        self.url.starts_with("postgres://") || self.url.starts_with("postgresql://")
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        if self.rotation.max_size == 0 {
            return Err(ConfigError::validation(
                "logger.file.rotation.max_size",
                "Rotation max_size must be greater than 0 bytes.",
            ));
        }

        if self.rotation.max_files == 0 {
            return Err(ConfigError::validation(
                "logger.file.rotation.max_files",
                "Rotation max_files must be greater than 0.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.validate()?;

        Ok(())
    }
}

impl BoardsConfig {
    /// Validate ingestion sources configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "boards.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.max_failures_per_source == 0 {
            return Err(ConfigError::validation(
                "boards.max_failures_per_source",
                "Failure threshold must be greater than 0.",
            ));
        }

        if self.country.len() != 2 {
            return Err(ConfigError::ValidationError {
                field: "boards.country".to_string(),
                message: format!(
                    "Country must be a two-letter code, got '{}'",
                    self.country
                ),
            });
        }

        Ok(())
    }
}

impl AutomationConfig {
    /// Validate browser automation configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.webdriver_url.is_empty() {
            return Err(ConfigError::validation(
                "automation.webdriver_url",
                "WebDriver URL is required.",
            ));
        }

        if !self.webdriver_url.starts_with("http://") && !self.webdriver_url.starts_with("https://")
        {
            return Err(ConfigError::validation(
                "automation.webdriver_url",
                "WebDriver URL must be an http(s) endpoint.",
            ));
        }

        if self.max_concurrent_sessions == 0 {
            return Err(ConfigError::validation(
                "automation.max_concurrent_sessions",
                "At least one concurrent session must be allowed.",
            ));
        }

        Ok(())
    }
}

impl AiConfig {
    /// Validate AI matching configuration
    ///
    /// Thresholds are scores in 0..=100 and apply must sit above maybe so
    /// the verdict bands do not overlap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=100).contains(&self.apply_threshold) {
            return Err(ConfigError::validation(
                "ai.apply_threshold",
                "Apply threshold must be between 0 and 100.",
            ));
        }

        if !(0..=100).contains(&self.maybe_threshold) {
            return Err(ConfigError::validation(
                "ai.maybe_threshold",
                "Maybe threshold must be between 0 and 100.",
            ));
        }

        if self.maybe_threshold >= self.apply_threshold {
            return Err(ConfigError::ValidationError {
                field: "ai.maybe_threshold".to_string(),
                message: format!(
                    "Maybe threshold ({}) must be below apply threshold ({}).",
                    self.maybe_threshold, self.apply_threshold
                ),
            });
        }

        if self.enabled && self.api_url.is_none() {
            return Err(ConfigError::validation(
                "ai.api_url",
                "API URL is required when AI matching is enabled.",
            ));
        }

        Ok(())
    }
}

impl UploadsConfig {
    /// Validate upload configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resume_dir.trim().is_empty() {
            return Err(ConfigError::validation(
                "uploads.resume_dir",
                "Resume directory is required.",
            ));
        }

        if self.max_resume_bytes == 0 {
            return Err(ConfigError::validation(
                "uploads.max_resume_bytes",
                "Maximum resume size must be greater than 0 bytes.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// This method validates all sub-configurations and returns the first
    /// validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        self.boards.validate()?;
        self.automation.validate()?;
        self.ai.validate()?;
        self.uploads.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn server_config_invalid_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "server.port")
        );
    }

    #[test]
    fn database_config_valid() {
        let config = DatabaseConfig {
            url: "postgres://localhost/jobpilot".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn database_config_empty_url() {
        let config = DatabaseConfig::default();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "database.url")
        );
    }

    #[test]
    fn database_config_rejects_non_postgres_url() {
        let config = DatabaseConfig {
            url: "mysql://localhost/db".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn database_config_min_exceeds_max() {
        let config = DatabaseConfig {
            url: "postgres://localhost/test".to_string(),
            max_connections: 5,
            min_connections: 10,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "database.min_connections")
        );
    }

    #[test]
    fn logger_settings_invalid_level() {
        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "logger.level")
        );
    }

    #[test]
    fn logger_settings_file_enabled_empty_path() {
        let settings = LoggerSettings {
            file: FileSettings {
                enabled: true,
                path: "".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "logger.file.path")
        );
    }

    #[test]
    fn boards_config_rejects_bad_country() {
        let config = BoardsConfig {
            country: "india".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "boards.country")
        );
    }

    #[test]
    fn boards_config_default_is_valid() {
        assert!(BoardsConfig::default().validate().is_ok());
    }

    #[test]
    fn automation_config_rejects_non_http_webdriver() {
        let config = AutomationConfig {
            webdriver_url: "localhost:9515".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn automation_config_rejects_zero_sessions() {
        let config = AutomationConfig {
            max_concurrent_sessions: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn ai_config_rejects_overlapping_thresholds() {
        let config = AiConfig {
            apply_threshold: 40,
            maybe_threshold: 70,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "ai.maybe_threshold")
        );
    }

    #[test]
    fn ai_config_enabled_requires_api_url() {
        let config = AiConfig {
            enabled: true,
            api_url: None,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn settings_validate_aggregates_sections() {
        let settings = Settings {
            database: DatabaseConfig {
                url: "postgres://localhost/jobpilot".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(settings.validate().is_ok());

        let bad = Settings {
            database: DatabaseConfig {
                url: "postgres://localhost/jobpilot".to_string(),
                ..Default::default()
            },
            ai: AiConfig {
                apply_threshold: 300,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
