//! CLI command definitions and dispatch for the `clq` binary.
//!
//! Uses clap derive macros for argument parsing. The commands mirror the
//! platform's tutorial flows: an interactive chat, a scripted multi-turn
//! conversation, and a build-and-release of a new bot version.

pub mod chat;
pub mod release;
pub mod script;

use clap::{Parser, Subcommand};

/// Talk to and release bots on the Colloquy platform.
#[derive(Parser)]
#[command(name = "clq", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Platform API key.
    #[arg(long, env = "COLLOQUY_API_KEY", hide_env_values = true, global = true, default_value = "")]
    pub api_key: String,

    /// Platform region.
    #[arg(long, global = true, default_value = "us-east-1")]
    pub region: String,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive conversation with a bot. Type 'quit' to exit.
    Chat {
        /// Bot identifier.
        #[arg(long)]
        bot_id: String,

        /// Alias to converse through.
        #[arg(long, default_value = "TSTALIASID")]
        alias_id: String,

        /// Locale of the conversation.
        #[arg(long, default_value = "en_US")]
        locale: String,
    },

    /// Run a scripted multi-turn conversation and print each turn.
    Script {
        /// Bot identifier.
        #[arg(long)]
        bot_id: String,

        /// Alias to converse through.
        #[arg(long, default_value = "TSTALIASID")]
        alias_id: String,

        /// Locale of the conversation.
        #[arg(long, default_value = "en_US")]
        locale: String,

        /// Utterances to send, in order.
        #[arg(required = true)]
        utterances: Vec<String>,
    },

    /// Build a new version from DRAFT and point an alias at it.
    Release {
        /// Bot identifier.
        #[arg(long)]
        bot_id: String,

        /// Locale to build.
        #[arg(long, default_value = "en_US")]
        locale: String,

        /// Alias to repoint at the new version.
        #[arg(long, default_value = "PROD")]
        alias: String,

        /// Description for the new version.
        #[arg(long)]
        description: Option<String>,

        /// Seconds between build status polls.
        #[arg(long, default_value = "15")]
        interval_secs: u64,

        /// Maximum seconds to wait for the build.
        #[arg(long, default_value = "300")]
        timeout_secs: u64,
    },
}
