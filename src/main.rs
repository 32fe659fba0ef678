use clap::Parser;

use jobpilot::cli::{self, Cli, Commands};
use jobpilot::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(env) = &cli.env {
        let env = jobpilot::config::Environment::from(env.clone());
        // Environment override must land before config loading.
        unsafe {
            std::env::set_var(jobpilot::config::Environment::ENV_VAR, env.as_str());
        }
    }

    let settings = cli::load_and_merge_config(&cli)?;
    cli::init_logger_from_settings(&settings)?;

    cli::execute_command(&cli, settings.clone()).await?;

    // execute_command returns Ok for a non-dry-run serve (or no
    // subcommand); everything else has already finished.
    let start_server = match &cli.command {
        None => true,
        Some(Commands::Serve { dry_run, .. }) => !dry_run,
        Some(Commands::Migrate { .. }) => false,
    };
    if start_server {
        Server::new(settings).run().await?;
    }

    Ok(())
}
