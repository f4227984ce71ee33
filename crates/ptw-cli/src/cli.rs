use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ptw")]
#[command(about = "Permit to work lifecycle runner", version)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, env = "PTW_LOG_JSON", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the built-in users
    Users,
    /// Run a YAML scenario script against a fresh in-memory store
    Run {
        /// Path to the script
        script: PathBuf,

        /// Print step results as JSON lines
        #[arg(long)]
        json: bool,
    },
}
