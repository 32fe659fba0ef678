//! Dispatches parsed CLI commands to their handlers.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::{AppError, AppResult};

/// Runs the requested command. `Serve` without `--dry-run` returns Ok
/// so main can start the server with the merged settings.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    cli.validate().map_err(|msg| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason: msg,
    })?;

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) if *dry_run => {
            ServeCommandHandler::new(settings).execute(true).await
        }
        Some(Commands::Serve { .. }) | None => Ok(()),
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/test".to_string();
        config.jwt.secret = "a-sufficiently-long-signing-secret-for-tests".to_string();
        config
    }

    #[tokio::test]
    async fn serve_dry_run_validates_and_exits() {
        let cli = Cli::try_parse_from(["jobpilot", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, valid_config()).await.is_ok());
    }

    #[tokio::test]
    async fn serve_defers_startup_to_main() {
        let cli = Cli::try_parse_from(["jobpilot", "serve"]).unwrap();
        assert!(execute_command(&cli, valid_config()).await.is_ok());
    }

    #[tokio::test]
    async fn migrate_dry_run_with_rollback_is_rejected() {
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: true,
                rollback: Some(5),
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };
        assert!(execute_command(&cli, valid_config()).await.is_err());
    }
}
