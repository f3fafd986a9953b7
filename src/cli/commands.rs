//! CLI command implementations
//!
//! Each command reads its inputs, runs one pipeline step and writes a single
//! JSON response. Request handling is split from I/O so it can be tested
//! without stdin/stdout.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use crate::adapter::{MemorySource, QueryBuilder, SelectStatement, SqlQueryBuilder};
use crate::config::PaginationConfig;
use crate::cursor::{Base64JsonCodec, CursorCodec};
use crate::paginator::Paginator;
use crate::planner::InputArgs;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Parse CLI args, run the command and report failures on stdout
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    match run_command(cli.command) {
        Ok(()) => Ok(()),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Plan { config, table } => plan(&config, &table),
        Command::Decode { token } => decode(&token),
        Command::Page { config, data } => page(&config, &data),
    }
}

/// Compile a request from stdin and print the plan with its SQL
pub fn plan(config_path: &Path, table: &str) -> CliResult<()> {
    let config = PaginationConfig::load(config_path)?;
    let args = parse_args(read_request()?)?;
    write_response(plan_request(config, table, &args)?)
}

/// Print the state inside a cursor token
pub fn decode(token: &str) -> CliResult<()> {
    write_response(decode_request(token)?)
}

/// Paginate rows from a data file with a request from stdin
pub fn page(config_path: &Path, data_path: &Path) -> CliResult<()> {
    let config = PaginationConfig::load(config_path)?;
    let rows = load_rows(data_path)?;
    let args = parse_args(read_request()?)?;
    write_response(page_request(config, rows, &args)?)
}

fn parse_args(request: Value) -> CliResult<InputArgs> {
    Ok(serde_json::from_value(request)?)
}

pub(crate) fn plan_request(
    config: PaginationConfig,
    table: &str,
    args: &InputArgs,
) -> CliResult<Value> {
    let paginator = Paginator::new(config);
    let plan = paginator.compile(args)?;
    let query = SqlQueryBuilder::new(&plan, paginator.translator())
        .create_query(SelectStatement::new(table))?
        .to_sql()?;

    Ok(json!({
        "plan": plan,
        "sql": query.sql,
        "params": query.params,
    }))
}

pub(crate) fn decode_request(token: &str) -> CliResult<Value> {
    let state = Base64JsonCodec.decode(token)?;
    Ok(serde_json::to_value(state)?)
}

pub(crate) fn page_request(
    config: PaginationConfig,
    rows: Vec<Value>,
    args: &InputArgs,
) -> CliResult<Value> {
    let paginator = Paginator::new(config);
    let result = paginator.page(&MemorySource::new(rows), args)?;
    Ok(serde_json::to_value(result)?)
}

fn load_rows(path: &Path) -> CliResult<Vec<Value>> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::io_error(format!("Failed to read {}: {}", path.display(), e))
    })?;

    match serde_json::from_str(&content)? {
        Value::Array(rows) => Ok(rows),
        _ => Err(CliError::io_error(format!(
            "{} must hold a JSON array of rows",
            path.display()
        ))),
    }
}
