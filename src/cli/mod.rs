//! CLI module for chronostore
//!
//! Provides command-line access to both stores:
//! - init: Create the data directory layout
//! - blob put / get
//! - record tables / append / latest / as-of / latest-all

mod args;
mod commands;
mod errors;
mod io;

pub use args::{BlobAction, Cli, Command, RecordAction};
pub use commands::execute;
pub use errors::{CliError, CliResult};
pub use io::{read_stdin, write_error, write_response};

use serde_json::Value;

use crate::config::Config;

/// Parse arguments, run the command and print its JSON response.
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match dispatch(&cli).await {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code(), &e.to_string())?;
            Err(e)
        }
    }
}

async fn dispatch(cli: &Cli) -> CliResult<Value> {
    let config = Config::load(&cli.config)?;
    let input = if cli.command.reads_stdin() {
        read_stdin()?
    } else {
        String::new()
    };
    execute(&config, &cli.command, &input).await
}
