//! CLI argument parsing with clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use shadow_rs::shadow;
shadow!(build);

/// Job application tracking and automation backend
#[derive(Parser, Debug)]
#[command(name = "jobpilot")]
#[command(about = "Job application tracking and automation backend")]
#[command(long_about = "
Jobpilot tracks job applications across multiple boards, scores postings
against your profile and can drive a browser to apply for you.

EXAMPLES:
    # Start the API server with default configuration
    jobpilot serve

    # Bind to all interfaces on port 8080
    jobpilot serve --host 0.0.0.0 --port 8080

    # Use a custom configuration file
    jobpilot --config /etc/jobpilot/production.toml serve

    # Validate configuration without starting
    jobpilot serve --dry-run

    # Apply pending database migrations
    jobpilot migrate

    # Preview pending migrations
    jobpilot migrate --dry-run
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path (TOML)
    ///
    /// Overrides the layered default/{environment}/local loading. The
    /// file must exist and be readable.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Available values: development (dev), production (prod), test
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable debug-level logging. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Log errors only. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server (default)
    Serve {
        /// Host address to bind to
        ///
        /// 127.0.0.1 for localhost only, 0.0.0.0 to accept connections
        /// from any interface.
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on (1-65535)
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over configuration files and the global
        /// --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit without starting the server
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to roll back (1-100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Checks argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref command) = self.command {
            match command {
                Commands::Serve { host, port, .. } => {
                    if let (Some(host), Some(port)) = (host, port) {
                        if host == "0.0.0.0" && *port < 1024 {
                            return Err(
                                "Binding to 0.0.0.0 on a privileged port (< 1024) typically requires root privileges".to_string(),
                            );
                        }
                    }
                }
                Commands::Migrate { dry_run, rollback } => {
                    if *dry_run && rollback.is_some() {
                        return Err("Cannot use --dry-run and --rollback together".to_string());
                    }
                }
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }
        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Production => crate::config::Environment::Production,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_behavior_has_no_command() {
        let cli = Cli::try_parse_from(["jobpilot"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn serve_command_parses_host_and_port() {
        let cli =
            Cli::try_parse_from(["jobpilot", "serve", "--host", "0.0.0.0", "--port", "8080"])
                .unwrap();
        if let Some(Commands::Serve { host, port, dry_run, .. }) = cli.command {
            assert_eq!(host, Some("0.0.0.0".to_string()));
            assert_eq!(port, Some(8080));
            assert!(!dry_run);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn migrate_dry_run_parses() {
        let cli = Cli::try_parse_from(["jobpilot", "migrate", "--dry-run"]).unwrap();
        if let Some(Commands::Migrate { dry_run, rollback }) = cli.command {
            assert!(dry_run);
            assert!(rollback.is_none());
        } else {
            panic!("Expected Migrate command");
        }
    }

    #[test]
    fn privileged_port_on_any_interface_is_rejected() {
        let cli = Cli::try_parse_from(["jobpilot", "serve", "--host", "0.0.0.0", "--port", "80"]);
        // Parsing succeeds; the combination check is in validate().
        let cli = cli.unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn conflicting_verbose_quiet() {
        let result = Cli::try_parse_from(["jobpilot", "--verbose", "--quiet"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }
}
