//! CLI argument definitions using clap
//!
//! Commands:
//! - chronostore init
//! - chronostore blob put|get <hash>
//! - chronostore record tables|append <table>|latest <table>|as-of <table> <instant>|latest-all

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chronostore - content-addressed blobs and point-in-time record tables
#[derive(Parser, Debug)]
#[command(name = "chronostore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./chronostore.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the blob and record directories
    Init,

    /// Blob store operations
    Blob {
        #[command(subcommand)]
        action: BlobAction,
    },

    /// Record store operations
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BlobAction {
    /// Store text read from stdin and print its hash
    Put,

    /// Print the text stored under a hash
    Get { hash: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RecordAction {
    /// List table names
    Tables,

    /// Append a JSON record read from stdin
    Append { table: String },

    /// Print the latest record of a table
    Latest { table: String },

    /// Print the latest record at or before an ISO-8601 instant
    AsOf { table: String, instant: String },

    /// Print the latest record of every table
    LatestAll,
}

impl Command {
    /// Whether the command consumes stdin
    pub fn reads_stdin(&self) -> bool {
        matches!(
            self,
            Command::Blob {
                action: BlobAction::Put
            } | Command::Record {
                action: RecordAction::Append { .. }
            }
        )
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
