//! CLI interface for Stackpad

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stackpad")]
#[command(version = "0.1.0")]
#[command(about = "Full-stack web application starter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new stackpad.toml configuration file
    Init,

    /// Create the database schema (idempotent)
    Migrate,

    /// Run the HTTP server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },
}
