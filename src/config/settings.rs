//! Configuration settings structures
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig, RotationConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "jobpilot".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_keep_alive_timeout() -> u64 {
    75
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/jobpilot.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_max_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

fn default_max_files() -> usize {
    5
}

fn default_jwt_secret() -> String {
    String::new()
}

fn default_access_token_expiration() -> i64 {
    1 // 1 hour
}

fn default_refresh_token_expiration() -> i64 {
    168 // 7 days (168 hours)
}

fn default_board_timeout() -> u64 {
    30
}

fn default_max_failures() -> u32 {
    3
}

fn default_country() -> String {
    "in".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}

fn default_page_load_timeout() -> u64 {
    30
}

fn default_element_wait_timeout() -> u64 {
    10
}

fn default_max_concurrent_sessions() -> usize {
    2
}

fn default_ai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_apply_threshold() -> i32 {
    70
}

fn default_maybe_threshold() -> i32 {
    40
}

fn default_ai_timeout() -> u64 {
    60
}

fn default_resume_dir() -> String {
    "uploads/resumes".to_string()
}

fn default_max_resume_bytes() -> u64 {
    10 * 1024 * 1024 // 10MB
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Keep-alive timeout in seconds
    #[serde(default = "default_keep_alive_timeout")]
    pub keep_alive_timeout: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            keep_alive_timeout: default_keep_alive_timeout(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Whether to automatically run pending migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// JWT Configuration
// ============================================================================

/// JWT authentication configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing JWT tokens
    /// IMPORTANT: This should be a strong, random string in production
    /// and should be kept secret (use environment variables)
    #[serde(default = "default_jwt_secret")]
    pub secret: String,

    /// Access token expiration time in hours
    #[serde(default = "default_access_token_expiration")]
    pub access_token_expiration: i64,

    /// Refresh token expiration time in hours
    #[serde(default = "default_refresh_token_expiration")]
    pub refresh_token_expiration: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_jwt_secret(),
            access_token_expiration: default_access_token_expiration(),
            refresh_token_expiration: default_refresh_token_expiration(),
        }
    }
}

impl JwtConfig {
    /// Validates the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "jwt.secret".to_string(),
                message: "JWT secret cannot be empty".to_string(),
            });
        }

        if self.secret.len() < 32 {
            return Err(ConfigError::ValidationError {
                field: "jwt.secret".to_string(),
                message: "JWT secret should be at least 32 characters for security".to_string(),
            });
        }

        if self.access_token_expiration <= 0 {
            return Err(ConfigError::ValidationError {
                field: "jwt.access_token_expiration".to_string(),
                message: "Access token expiration must be positive".to_string(),
            });
        }

        if self.refresh_token_expiration <= 0 {
            return Err(ConfigError::ValidationError {
                field: "jwt.refresh_token_expiration".to_string(),
                message: "Refresh token expiration must be positive".to_string(),
            });
        }

        if self.access_token_expiration >= self.refresh_token_expiration {
            return Err(ConfigError::ValidationError {
                field: "jwt".to_string(),
                message: "Refresh token expiration should be longer than access token expiration"
                    .to_string(),
            });
        }

        Ok(())
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// Size-based rotation settings for file logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationSettings {
    /// Maximum file size in bytes before rotation
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    /// Maximum number of rotated files to keep
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Whether to compress rotated files
    #[serde(default)]
    pub compress: bool,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            max_files: default_max_files(),
            compress: false,
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Rotation settings
    #[serde(default)]
    pub rotation: RotationSettings,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
            rotation: RotationSettings::default(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to the runtime LoggerConfig used by the
    /// logger module.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console_config = self.console.into_console_config();
        let file_config = self.file.into_file_config()?;

        LoggerConfig::new(console_config, file_config, self.level).map_err(|e| {
            ConfigError::ValidationError {
                field: "logger".to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl ConsoleSettings {
    pub fn into_console_config(self) -> ConsoleConfig {
        ConsoleConfig::new(self.enabled, self.colored)
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self.parse_format()?;
        let rotation_config = self.rotation.into_rotation_config()?;

        FileConfig::new(
            self.enabled,
            PathBuf::from(self.path),
            self.append,
            format,
            rotation_config,
        )
        .map_err(|e| ConfigError::ValidationError {
            field: "logger.file".to_string(),
            message: e.to_string(),
        })
    }

    fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })
    }
}

impl RotationSettings {
    pub fn into_rotation_config(self) -> Result<RotationConfig, ConfigError> {
        RotationConfig::new(self.max_size, self.max_files, self.compress).map_err(|e| {
            ConfigError::ValidationError {
                field: "logger.file.rotation".to_string(),
                message: e.to_string(),
            }
        })
    }
}

// ============================================================================
// Job Board Configuration
// ============================================================================

/// Ingestion sources configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardsConfig {
    /// SerpAPI key for the Google Jobs source. The source is skipped when
    /// the key is absent.
    #[serde(default)]
    pub serpapi_key: Option<String>,

    /// Per-request timeout in seconds for source fetches
    #[serde(default = "default_board_timeout")]
    pub request_timeout: u64,

    /// Consecutive failures before a source is disabled for the rest of
    /// the sync run
    #[serde(default = "default_max_failures")]
    pub max_failures_per_source: u32,

    /// Country code passed to location-aware sources (gl parameter)
    #[serde(default = "default_country")]
    pub country: String,

    /// Language code passed to location-aware sources (hl parameter)
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for BoardsConfig {
    fn default() -> Self {
        Self {
            serpapi_key: None,
            request_timeout: default_board_timeout(),
            max_failures_per_source: default_max_failures(),
            country: default_country(),
            language: default_language(),
        }
    }
}

// ============================================================================
// Automation Configuration
// ============================================================================

/// Browser automation engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// WebDriver endpoint (chromedriver or a Selenium grid)
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Whether to run the browser headless
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Page load timeout in seconds
    #[serde(default = "default_page_load_timeout")]
    pub page_load_timeout: u64,

    /// Timeout in seconds when waiting for an element to appear
    #[serde(default = "default_element_wait_timeout")]
    pub element_wait_timeout: u64,

    /// Maximum concurrently running automation sessions
    #[serde(default = "default_max_concurrent_sessions")]
    pub max_concurrent_sessions: usize,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: true,
            page_load_timeout: default_page_load_timeout(),
            element_wait_timeout: default_element_wait_timeout(),
            max_concurrent_sessions: default_max_concurrent_sessions(),
        }
    }
}

// ============================================================================
// AI Configuration
// ============================================================================

/// Job matching and cover letter generation configuration.
///
/// When `enabled` is false or the API is unreachable, matching falls back
/// to skill-overlap scoring and cover letters use the built-in template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Whether to call the external model at all
    #[serde(default)]
    pub enabled: bool,

    /// Chat completions endpoint
    #[serde(default)]
    pub api_url: Option<String>,

    /// API key for the model endpoint
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_ai_model")]
    pub model: String,

    /// Minimum match score for an `apply` verdict
    #[serde(default = "default_apply_threshold")]
    pub apply_threshold: i32,

    /// Minimum match score for a `maybe` verdict
    #[serde(default = "default_maybe_threshold")]
    pub maybe_threshold: i32,

    /// Request timeout in seconds
    #[serde(default = "default_ai_timeout")]
    pub timeout: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: None,
            api_key: None,
            model: default_ai_model(),
            apply_threshold: default_apply_threshold(),
            maybe_threshold: default_maybe_threshold(),
            timeout: default_ai_timeout(),
        }
    }
}

// ============================================================================
// Upload Configuration
// ============================================================================

/// Resume upload configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadsConfig {
    /// Directory where uploaded resumes are stored
    #[serde(default = "default_resume_dir")]
    pub resume_dir: String,

    /// Maximum accepted resume size in bytes
    #[serde(default = "default_max_resume_bytes")]
    pub max_resume_bytes: u64,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            resume_dir: default_resume_dir(),
            max_resume_bytes: default_max_resume_bytes(),
        }
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// JWT authentication configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,

    /// Ingestion sources configuration
    #[serde(default)]
    pub boards: BoardsConfig,

    /// Browser automation configuration
    #[serde(default)]
    pub automation: AutomationConfig,

    /// AI matching configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Upload handling configuration
    #[serde(default)]
    pub uploads: UploadsConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_server_config() -> impl Strategy<Value = ServerConfig> {
        (
            prop_oneof![
                Just("127.0.0.1".to_string()),
                Just("0.0.0.0".to_string()),
                Just("localhost".to_string()),
            ],
            1u16..=65535u16,
            1u64..=300u64,
            1u64..=300u64,
        )
            .prop_map(
                |(host, port, request_timeout, keep_alive_timeout)| ServerConfig {
                    host,
                    port,
                    request_timeout,
                    keep_alive_timeout,
                },
            )
    }

    proptest! {
        #[test]
        fn server_address_is_host_colon_port(config in arb_server_config()) {
            let address = config.address();
            prop_assert_eq!(address, format!("{}:{}", config.host, config.port));
        }

        #[test]
        fn settings_toml_roundtrip(config in arb_server_config()) {
            let settings = Settings {
                server: config,
                ..Default::default()
            };
            let serialized = toml::to_string(&settings).unwrap();
            let restored: Settings = toml::from_str(&serialized).unwrap();
            prop_assert_eq!(restored.server, settings.server);
        }
    }

    #[test]
    fn jwt_validate_rejects_short_secret() {
        let config = JwtConfig {
            secret: "short".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn jwt_validate_requires_refresh_longer_than_access() {
        let config = JwtConfig {
            secret: "a".repeat(64),
            access_token_expiration: 24,
            refresh_token_expiration: 12,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn jwt_validate_accepts_sane_config() {
        let config = JwtConfig {
            secret: "a".repeat(64),
            access_token_expiration: 1,
            refresh_token_expiration: 168,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn logger_settings_convert_to_logger_config() {
        let settings = LoggerSettings::default();
        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "info");
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
    }

    #[test]
    fn logger_settings_invalid_format_rejected() {
        let settings = LoggerSettings {
            file: FileSettings {
                format: "yaml".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(settings.into_logger_config().is_err());
    }

    #[test]
    fn ai_defaults_match_fallback_thresholds() {
        let config = AiConfig::default();
        assert_eq!(config.apply_threshold, 70);
        assert_eq!(config.maybe_threshold, 40);
        assert!(!config.enabled);
    }
}
