//! # codetools
//!
//! Shared pieces of the `codebanner` and `codestats` command-line tools.
//!
//! ## Usage
//!
//! ```bash
//! # Create a default .codebanner.json in the current folder
//! codebanner init
//!
//! # List the files selected by the configuration, then record them
//! codebanner scan
//! codebanner scan --update merge
//!
//! # Rewrite the banner of every configured file
//! codebanner write --git-history
//!
//! # Line statistics for the files tracked by git
//! codestats .
//! codestats . --output json
//! codestats . --no-git
//! ```

pub mod render;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` over `info`.
/// Logs go to stderr so that reports on stdout stay machine-readable.
pub fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
