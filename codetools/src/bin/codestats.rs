//! # codestats
//!
//! Counts code, test, comment and blank lines per language.
//!
//! Files come from the git index at HEAD by default, or from walking the
//! folder with `--no-git`. An optional `.codestats.json` in the folder tags
//! test and documentation files and excludes paths:
//!
//! ```json
//! {
//!     "test_patterns": ["tests/*"],
//!     "doc_patterns": ["docs/*"],
//!     "exclude_patterns": ["third_party/*"]
//! }
//! ```

use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use codetools::render::render_table;
use codetools::setup_logging;
use codetoolslib::{scan_folder, FileSource, StatsConfig, StatsTable};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("codestats")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Per-language line statistics with test/code separation")
        .arg(
            Arg::new("folder")
                .help("Folder to analyze (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("no-git")
                .long("no-git")
                .action(ArgAction::SetTrue)
                .help("Walk the folder instead of listing files tracked by git"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let folder = matches
        .get_one::<String>("folder")
        .map(|s| s.as_str())
        .unwrap_or(".");

    let source = if matches.get_flag("no-git") {
        FileSource::Walk
    } else {
        FileSource::Git
    };

    let config = StatsConfig::load(folder)?;
    let report = scan_folder(folder, source, &config)?;

    if !report.skipped.is_empty() {
        tracing::info!("Skipped {} unsupported files", report.skipped.len());
    }

    let table = StatsTable::from_report(&report);

    match matches.get_one::<String>("output").map(|s| s.as_str()) {
        Some("json") => println!("{}", serde_json::to_string_pretty(&table)?),
        _ => print!("{}", render_table(&table)),
    }

    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    setup_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
