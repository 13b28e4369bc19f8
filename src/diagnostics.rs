//! Append-only diagnostics log
//!
//! The sink owns the log path. Every entry opens the file in append mode,
//! writes one timestamped line, and closes it again, so nothing written before
//! a crash is lost. Entries are never rewritten or removed.

use crate::error::{Error, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const BANNER_RULE: &str = "====================================================";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Durable, timestamped record of pipeline events
#[derive(Clone, Debug)]
pub struct DiagnosticsSink {
    path: PathBuf,
}

impl DiagnosticsSink {
    /// Open a logging session by writing the start banner
    ///
    /// Creates the parent directory if needed. Failing to write the banner is
    /// fatal: the pipeline must not run without durable diagnostics.
    pub fn init(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| Error::Diagnostics {
                path: path.clone(),
                source,
            })?;
        }

        let banner = format!(
            "{BANNER_RULE}\nLogging session started: {}\n{BANNER_RULE}\n",
            Local::now().format(TIMESTAMP_FORMAT)
        );
        write_entry(&path, &banner).map_err(|source| Error::Diagnostics {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "diagnostics session started");
        Ok(Self { path })
    }

    /// Append one timestamped line
    ///
    /// Errors opening or writing the log are swallowed; they only surface as a
    /// `tracing` warning. Blocking: the line is on disk before this returns.
    pub fn append(&self, line: &str) {
        let entry = format!("{} - {}\n", Local::now().format(TIMESTAMP_FORMAT), line);
        if let Err(e) = write_entry(&self.path, &entry) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to append diagnostics entry"
            );
        }
    }

    /// Log file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// Blocking std::fs on purpose: open, append, close per entry
fn write_entry(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())
}
