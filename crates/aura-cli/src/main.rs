//! Aura CLI entry point.
//!
//! Binary name: `aura`
//!
//! Parses CLI arguments, loads client configuration, then dispatches to
//! the appropriate command handler.

mod cli;

use std::path::PathBuf;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use aura_client::SupportApi;
use aura_client::config::{self, BASE_URL_ENV};
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,aura=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "aura", &mut std::io::stdout());
        return Ok(());
    }

    let config_dir = config::config_dir().unwrap_or_else(|| PathBuf::from("."));
    let client_config = config::load_client_config(&config_dir).await;
    let base_url = config::resolve_base_url(&client_config, std::env::var(BASE_URL_ENV).ok());
    tracing::debug!(base_url = %base_url, "resolved support service endpoint");
    let api = SupportApi::new(base_url);

    match cli.command {
        Commands::Register { name, email } => {
            cli::register::run_register(&api, name, email).await?;
        }

        Commands::Chat { email } => {
            cli::chat::run_chat(api, email).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
