//! Command-line interface for the watchlist server.

mod commands;

use clap::{Parser, Subcommand};

/// Watchlist - a single-owner movie list served over HTTP
#[derive(Parser)]
#[command(name = "watchlist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    Serve,

    /// Create the database tables
    Initdb {
        /// Drop every table before creating them again
        #[arg(long)]
        drop: bool,
    },

    /// Seed the owner profile and a demo movie list
    Forge,

    /// Create the owner login, or replace its credentials
    Admin {
        /// Login username; prompted for when omitted
        #[arg(long)]
        username: Option<String>,
        /// Login password; prompted for (with confirmation) when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
