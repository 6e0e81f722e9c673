//! CLI module for the Insurance Expense API
//!
//! A single `serve` subcommand loads the artifact and runs the HTTP
//! server.

pub mod serve;

use clap::{Parser, Subcommand};

/// Insurance Expense API - predicts annual medical insurance expenses
#[derive(Parser)]
#[command(name = "insurance-expense-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the prediction server
    Serve,
}
