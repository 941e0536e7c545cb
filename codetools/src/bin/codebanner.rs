//! # codebanner
//!
//! Keeps a copyright banner at the top of every source file of a project.
//!
//! The project is described by a `.codebanner.json` file in the work folder:
//! which folders and patterns select files, the project/license/owner fields
//! shared by every banner, and a per-file entry with its description, author
//! and contributors.
//!
//! ## Commands
//!
//! - `init`: write a default configuration, replacing any existing one
//! - `scan [--update no|merge|full]`: list selected files, or record them in
//!   the configuration
//! - `write [--git-history]`: rewrite the banner of every configured file

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use codetools::setup_logging;
use codetoolslib::banner::{
    current_year, write_files, BannerConfig, UpdateMode, WriteOptions, DEFAULT_CONFIG_FILE,
};
use codetoolslib::GitHistory;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("codebanner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Insert and refresh copyright banners in source files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("folder")
                .long("folder")
                .global(true)
                .default_value(".")
                .help("Work folder containing the configuration"),
        )
        .arg(
            Arg::new("config-file")
                .long("config-file")
                .global(true)
                .default_value(DEFAULT_CONFIG_FILE)
                .help("Name of the configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("init").about("Reset the configuration to defaults"))
        .subcommand(
            Command::new("scan")
                .about("List the files selected by the configuration")
                .arg(
                    Arg::new("update")
                        .long("update")
                        .value_parser(["no", "merge", "full"])
                        .default_value("no")
                        .help("How to update the files of the configuration"),
                ),
        )
        .subcommand(
            Command::new("write")
                .about("Write banners to every configured file")
                .arg(
                    Arg::new("git-history")
                        .long("git-history")
                        .action(ArgAction::SetTrue)
                        .help("Use the first git commit year when no start year is configured"),
                ),
        )
}

/// Folder and configuration file name from matches
fn work_location(matches: &ArgMatches) -> (&str, &str) {
    let folder = matches
        .get_one::<String>("folder")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let config_file = matches
        .get_one::<String>("config-file")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_CONFIG_FILE);
    (folder, config_file)
}

fn init_handler(folder: &str, config_file: &str) -> anyhow::Result<()> {
    BannerConfig::initial(current_year()).save(folder, config_file)?;
    println!("Initialized {}", Path::new(folder).join(config_file).display());
    Ok(())
}

fn scan_handler(matches: &ArgMatches, folder: &str, config_file: &str) -> anyhow::Result<()> {
    let mode: UpdateMode = matches
        .get_one::<String>("update")
        .map(|s| s.as_str())
        .unwrap_or("no")
        .parse()
        .map_err(anyhow::Error::msg)?;

    let config = BannerConfig::load(folder, config_file, current_year())?;
    let files = config.discover(folder)?;

    let remove_missing = match mode {
        UpdateMode::No => {
            for file in &files {
                println!("{}", file);
            }
            return Ok(());
        }
        UpdateMode::Merge => false,
        UpdateMode::Full => true,
    };

    let updated = config.merge_files(&files, remove_missing);
    let added = files
        .iter()
        .filter(|path| !config.files.contains_key(*path))
        .count();
    let removed = config
        .files
        .keys()
        .filter(|path| !updated.files.contains_key(*path))
        .count();

    updated.save(folder, config_file)?;
    println!(
        "{} files configured ({} added, {} removed)",
        updated.files.len(),
        added,
        removed
    );

    Ok(())
}

fn write_handler(matches: &ArgMatches, folder: &str, config_file: &str) -> anyhow::Result<()> {
    let config = BannerConfig::load(folder, config_file, current_year())?;

    let history = if matches.get_flag("git-history") {
        match GitHistory::discover(folder) {
            Ok(history) => Some(history),
            Err(e) => {
                tracing::warn!("Git history unavailable, using the current year: {}", e);
                None
            }
        }
    } else {
        None
    };

    let mut options = WriteOptions::new(current_year());
    if let Some(history) = &history {
        options = options.history(history);
    }

    let report = write_files(folder, &config, &options)
        .with_context(|| format!("No banner written in {}", folder))?;

    println!(
        "{} written, {} unchanged, {} skipped",
        report.written.len(),
        report.unchanged.len(),
        report.skipped.len()
    );
    for skipped in &report.skipped {
        println!("  skipped {}: {}", skipped.path, skipped.reason);
    }

    Ok(())
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let (folder, config_file) = work_location(matches);

    match matches.subcommand() {
        Some(("init", _)) => init_handler(folder, config_file),
        Some(("scan", sub)) => scan_handler(sub, folder, config_file),
        Some(("write", sub)) => write_handler(sub, folder, config_file),
        _ => Err(anyhow::anyhow!("Unknown command")),
    }
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
