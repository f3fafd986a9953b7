//! CLI argument definitions using clap
//!
//! Commands:
//! - pagewise plan --config <path> [--table <name>]
//! - pagewise decode --token <token>
//! - pagewise page --config <path> --data <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pagewise - Cursor pagination compiler
#[derive(Parser, Debug)]
#[command(name = "pagewise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a request read from stdin and print the plan and SQL
    Plan {
        /// Path to configuration file
        #[arg(long, default_value = "./pagewise.json")]
        config: PathBuf,

        /// Table the rendered SQL selects from
        #[arg(long, default_value = "items")]
        table: String,
    },

    /// Decode a cursor token and print its state
    Decode {
        /// Opaque cursor token
        #[arg(long)]
        token: String,
    },

    /// Paginate a JSON array of rows with a request read from stdin
    Page {
        /// Path to configuration file
        #[arg(long, default_value = "./pagewise.json")]
        config: PathBuf,

        /// Path to a JSON file holding an array of row objects
        #[arg(long)]
        data: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
