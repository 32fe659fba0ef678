//! Merges CLI argument overrides into file-based configuration.

use std::path::PathBuf;

use super::parser::{Cli, Commands};
use crate::config::{ConfigError, ConfigLoader, Settings};

/// CLI arguments take precedence over configuration file values.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads configuration from an explicit file or the layered default
    /// loader.
    pub fn from_config_path(config_path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_path {
            Self::validate_config_file_access(path)?;
            Self::load_config_from_file(path)?
        } else {
            ConfigLoader::new()?.load()?
        };
        Ok(Self::new(config))
    }

    fn validate_config_file_access(path: &PathBuf) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ValidationError {
                field: "config_file".to_string(),
                message: format!("Configuration file does not exist: '{}'", path.display()),
            });
        }
        if !path.is_file() {
            return Err(ConfigError::ValidationError {
                field: "config_file".to_string(),
                message: format!("Configuration path is not a file: '{}'", path.display()),
            });
        }
        std::fs::File::open(path).map_err(|e| ConfigError::ValidationError {
            field: "config_file".to_string(),
            message: format!("Cannot read configuration file '{}': {e}", path.display()),
        })?;
        Ok(())
    }

    fn load_config_from_file(path: &PathBuf) -> Result<Settings, ConfigError> {
        // The loader resolves files via JOBPILOT_CONFIG_FILE.
        unsafe {
            std::env::set_var("JOBPILOT_CONFIG_FILE", path);
        }
        let result = ConfigLoader::new().and_then(|loader| loader.load());
        unsafe {
            std::env::remove_var("JOBPILOT_CONFIG_FILE");
        }
        result
    }

    /// Applies global and command-specific overrides, then validates the
    /// merged result.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve { host, port, log_level, .. }) = &cli.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            // Command-level log level beats the global flags.
            if let Some(level) = log_level {
                config.logger.level = level.clone().into();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn base_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/test".to_string();
        config
    }

    #[test]
    fn verbose_flag_raises_log_level() {
        let merger = ConfigurationMerger::new(base_config());
        let cli = Cli::try_parse_from(["jobpilot", "--verbose"]).unwrap();
        assert_eq!(merger.merge_cli_args(&cli).unwrap().logger.level, "debug");
    }

    #[test]
    fn quiet_flag_lowers_log_level() {
        let merger = ConfigurationMerger::new(base_config());
        let cli = Cli::try_parse_from(["jobpilot", "--quiet"]).unwrap();
        assert_eq!(merger.merge_cli_args(&cli).unwrap().logger.level, "error");
    }

    #[test]
    fn serve_host_and_port_override_config() {
        let merger = ConfigurationMerger::new(base_config());
        let cli =
            Cli::try_parse_from(["jobpilot", "serve", "--host", "0.0.0.0", "--port", "8080"])
                .unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn command_log_level_beats_global_verbose() {
        let merger = ConfigurationMerger::new(base_config());
        let cli = Cli::try_parse_from(["jobpilot", "--verbose", "serve", "--log-level", "warn"])
            .unwrap();
        assert_eq!(merger.merge_cli_args(&cli).unwrap().logger.level, "warn");
    }
}
