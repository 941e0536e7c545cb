//! Batch banner writing.
//!
//! Every file in the configuration is rewritten in place. Problems with a
//! single file (missing on disk, unsupported language, unreadable content) are
//! logged and reported, and the batch moves on. Unknown author identifiers are
//! checked for all files before anything is written and abort the batch.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::CodetoolsError;
use crate::language::classify;
use crate::persist::write_atomic;
use crate::source::git::RevisionHistory;
use crate::Result;

use super::config::BannerConfig;
use super::render::{banner_syntax, BannerSpec};
use super::rewrite::rewrite;

/// Options for [`write_files`].
#[derive(Clone, Copy)]
pub struct WriteOptions<'a> {
    /// Start year used when the configuration has none
    pub fallback_year: i32,
    /// Per-file history; its earliest year replaces `fallback_year`
    pub history: Option<&'a dyn RevisionHistory>,
}

impl fmt::Debug for WriteOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteOptions")
            .field("fallback_year", &self.fallback_year)
            .field("history", &self.history.map(|_| "RevisionHistory"))
            .finish()
    }
}

impl<'a> WriteOptions<'a> {
    pub fn new(fallback_year: i32) -> Self {
        Self {
            fallback_year,
            history: None,
        }
    }

    pub fn history(mut self, history: &'a dyn RevisionHistory) -> Self {
        self.history = Some(history);
        self
    }
}

/// A configured file that was not rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Outcome of a batch write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    /// Files whose content changed
    pub written: Vec<String>,
    /// Files that already carried the banner
    pub unchanged: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

impl WriteReport {
    fn skip(&mut self, path: &str, error: CodetoolsError) {
        tracing::warn!("Skipping {}: {}", path, error);
        self.skipped.push(SkippedFile {
            path: path.to_string(),
            reason: error.to_string(),
        });
    }
}

/// Start year for one file when the configuration leaves it empty.
fn fallback_year(spec: &BannerSpec, path: &Path, options: &WriteOptions<'_>) -> i32 {
    if spec.start_year.is_some() {
        return options.fallback_year;
    }

    let Some(history) = options.history else {
        return options.fallback_year;
    };

    match history.modification_years(path) {
        Ok(years) => years.first().copied().unwrap_or(options.fallback_year),
        Err(e) => {
            tracing::warn!("{}, using {}", e, options.fallback_year);
            options.fallback_year
        }
    }
}

/// Rewrite the banner of every file listed in `config`.
///
/// Paths in the configuration are relative to `base`.
pub fn write_files(
    base: impl AsRef<Path>,
    config: &BannerConfig,
    options: &WriteOptions<'_>,
) -> Result<WriteReport> {
    let base = base.as_ref();

    if !base.is_dir() {
        return Err(CodetoolsError::ConfigMissing(base.to_path_buf()));
    }

    config.validate_authors()?;

    let spec = BannerSpec::from(config);
    let mut report = WriteReport::default();

    for (key, entry) in &config.files {
        let path = base.join(key);

        if !path.is_file() {
            report.skip(key, CodetoolsError::FileMissing(path));
            continue;
        }

        let language = match classify(&path).and_then(|l| banner_syntax(l, &path).map(|_| l)) {
            Ok(language) => language,
            Err(e) => {
                report.skip(key, e);
                continue;
            }
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                report.skip(
                    key,
                    CodetoolsError::FileRead {
                        path: path.clone(),
                        source: e,
                    },
                );
                continue;
            }
        };

        let year = fallback_year(&spec, &path, options);
        let banner = spec.render(key, entry, language, year)?;
        let syntax = banner_syntax(language, &path)?;

        let updated = rewrite(&content, syntax, &banner);

        if updated == content {
            tracing::debug!("Unchanged {}", key);
            report.unchanged.push(key.clone());
            continue;
        }

        match write_atomic(&path, updated.as_bytes()) {
            Ok(()) => {
                tracing::info!("Wrote banner to {}", key);
                report.written.push(key.clone());
            }
            Err(e) => report.skip(key, e),
        }
    }

    Ok(report)
}
