//! CLI command definitions and handlers.

use clap::{Parser, Subcommand};

pub mod serve;

/// Intake - Real-Time Patient Intake Server
#[derive(Parser)]
#[command(name = "intake")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the intake web server
    Serve(serve::ServeArgs),
}
