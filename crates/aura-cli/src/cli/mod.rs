//! CLI command definitions and dispatch for the `aura` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod register;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with Aura, your AI support companion.
#[derive(Parser)]
#[command(name = "aura", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
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
    /// Create a new account.
    Register {
        /// Display name (prompted if omitted).
        #[arg(long)]
        name: Option<String>,

        /// Account email (prompted if omitted).
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign in and start an interactive chat session.
    Chat {
        /// Account email (prompted if omitted).
        #[arg(long)]
        email: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
