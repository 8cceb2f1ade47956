//! Append-only run log.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use grantcalc_shared::AppResult;

/// Appends one record per calculator run to a text file.
#[derive(Debug, Clone)]
pub struct RunLogger {
    path: PathBuf,
}

impl RunLogger {
    /// Creates a logger for `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a record: a rule, the run timestamp, the report, and a blank line.
    pub fn append(&self, at: DateTime<Local>, report: &str) -> AppResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        writeln!(file, "{}", "=".repeat(60))?;
        writeln!(file, "Run: {}", at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(file)?;
        file.write_all(report.as_bytes())?;
        if !report.ends_with('\n') {
            writeln!(file)?;
        }
        writeln!(file)?;

        tracing::debug!(path = %self.path.display(), "Appended run record");
        Ok(())
    }
}
