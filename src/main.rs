// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! commit-config - Conventional commit message linter
//!
//! Entry point for the `commit-msg` hook and CI checks.

use commit_config::cli::{run, Cli};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    // A failed lint is an error too, so any `Err` exits 1.
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so `--format json` output on stdout stays parseable.
/// `--debug` overrides `RUST_LOG`.
fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::try_new("commit_config=debug,warn").unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if debug {
        tracing::debug!("Debug logging enabled");
    }
}
