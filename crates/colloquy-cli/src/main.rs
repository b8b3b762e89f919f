//! Colloquy command-line client entry point.
//!
//! Binary name: `clq`
//!
//! Parses CLI arguments, initializes tracing, constructs the HTTP clients
//! and drivers, then dispatches to the appropriate command handler.

mod cli;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use colloquy_core::conversation::SessionDriver;
use colloquy_core::lifecycle::ReleaseDriver;
use colloquy_infra::{HttpConversationClient, HttpLifecycleClient};
use colloquy_types::config::{BotTarget, PollConfig};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,colloquy_core=debug,colloquy_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let api_key = SecretString::from(cli.api_key.clone());

    match cli.command {
        Commands::Chat {
            ref bot_id,
            ref alias_id,
            ref locale,
        } => {
            let endpoint = HttpConversationClient::new(api_key, &cli.region);
            let target = BotTarget::new(bot_id.clone(), alias_id.clone(), locale.clone());
            let driver = SessionDriver::new(endpoint, target);
            cli::chat::run_chat(&driver).await?;
        }

        Commands::Script {
            ref bot_id,
            ref alias_id,
            ref locale,
            ref utterances,
        } => {
            let endpoint = HttpConversationClient::new(api_key, &cli.region);
            let target = BotTarget::new(bot_id.clone(), alias_id.clone(), locale.clone());
            let driver = SessionDriver::new(endpoint, target);
            cli::script::run_script(&driver, utterances).await?;
        }

        Commands::Release {
            ref bot_id,
            ref locale,
            ref alias,
            ref description,
            interval_secs,
            timeout_secs,
        } => {
            let endpoint = HttpLifecycleClient::new(api_key, &cli.region);
            let poll = PollConfig {
                interval_ms: interval_secs * 1_000,
                timeout_ms: timeout_secs * 1_000,
                ..PollConfig::default()
            };
            let driver = ReleaseDriver::new(endpoint, poll);
            cli::release::run_release(&driver, bot_id, locale, alias, description.as_deref())
                .await?;
        }
    }

    Ok(())
}
