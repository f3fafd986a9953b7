//! CLI module for pagewise
//!
//! Provides command-line interface for:
//! - plan: Compile a request and render its SQL
//! - decode: Inspect a cursor token
//! - page: Paginate JSON rows in memory

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{decode, page, plan, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
