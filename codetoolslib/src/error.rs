//! Error types for codetoolslib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while classifying, counting or rewriting files
#[derive(Error, Debug)]
pub enum CodetoolsError {
    /// The working folder does not exist
    #[error("folder does not exist: {0}")]
    ConfigMissing(PathBuf),

    /// Configuration file could not be parsed or lacks a required field
    #[error("malformed configuration '{path}': {message}")]
    MalformedConfig { path: PathBuf, message: String },

    /// No language rule matches the file name or extension
    #[error("unknown language for file: {0}")]
    UnknownLanguage(PathBuf),

    /// Author identifier is absent from the authors table
    #[error("unknown author '{id}' for file '{file}'")]
    UnknownAuthor { id: String, file: String },

    /// Contributor identifier is absent from the authors table
    #[error("unknown contributor '{id}' for file '{file}'")]
    UnknownContributor { id: String, file: String },

    /// A configured file no longer exists on disk
    #[error("file missing: {0}")]
    FileMissing(PathBuf),

    /// Version-control history could not be read
    #[error("revision history unavailable for '{path}': {message}")]
    RevisionHistoryUnavailable { path: PathBuf, message: String },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Git operation error
    #[error("git error: {0}")]
    GitError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
