//! CLI module for the health tracker API

pub mod serve;

use clap::{Parser, Subcommand};

/// Health tracker API - patient and doctor accounts with Fitbit data
#[derive(Parser)]
#[command(name = "health-tracker-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),
}
