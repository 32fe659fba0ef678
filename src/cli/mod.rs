//! Command-line interface: parsing, config merging and command dispatch.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use crate::config::Settings;
use crate::logger::init_logger;

/// Loads configuration and applies CLI overrides. Exits with a message
/// on configuration errors since logging is not yet initialized.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = match ConfigurationMerger::from_config_path(cli.config.as_ref()) {
        Ok(merger) => merger,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    merger.merge_cli_args(cli).map_err(|e| {
        eprintln!("Configuration merge error: {e}");
        std::process::exit(1);
    })
}

/// Initializes the logger from the merged settings.
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = match settings.logger.clone().into_logger_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Logger configuration error: {e}");
            std::process::exit(1);
        }
    };

    init_logger(logger_config).map_err(|e| {
        eprintln!("Logger initialization error: {e}");
        std::process::exit(1);
    })
}
