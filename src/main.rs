//! chronostore CLI entry point
//!
//! Installs logging (stderr, filtered by `RUST_LOG`) and delegates to
//! `cli::run`, which prints a JSON response on stdout. Exits non-zero on
//! failure.

use chronostore::cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if cli::run().await.is_err() {
        std::process::exit(1);
    }
}
