//! Sphinx CLI binary.
//!
//! # Usage
//!
//! ```bash
//! # Create a master key
//! export SPHINX_MASTER_KEY=$(sphinx keygen)
//!
//! # Per-host salt
//! sphinx derive salt example.org
//!
//! # Encrypt and decrypt with the key bound to a record
//! sphinx encrypt "account list" --input vault
//! sphinx decrypt <hex payload> --input vault
//! ```

use std::io;

use clap::Parser;
use sphinx_cli::{Cli, run};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    run(&cli, &mut io::stdout().lock())
}
