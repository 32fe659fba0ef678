//! Application configuration
//!
//! Layered configuration loading with environment-specific overrides and
//! environment variable support. Files are loaded in order of precedence:
//! `default.toml` < `{environment}.toml` < `local.toml` < environment
//! variables with the `JOBPILOT` prefix.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    AiConfig, ApplicationConfig, AutomationConfig, BoardsConfig, DatabaseConfig, JwtConfig,
    LoggerSettings, ServerConfig, Settings, UploadsConfig,
};
