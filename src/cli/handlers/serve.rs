//! Serve command handler: dry-run validation before server startup.

use crate::config::Settings;
use crate::error::AppResult;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// With `dry_run` the configuration is validated and the process
    /// exits. Otherwise this returns Ok and main starts the server.
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.validate_only()
        } else {
            Ok(())
        }
    }

    fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        self.config.jwt.validate()?;
        self.config.logger.clone().into_logger_config()?;

        println!("Configuration is valid");
        println!("Server would bind to: {}", self.config.server.address());
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
