//! Source line access
//!
//! The analyzer consumes a finite, restartable, ordered sequence of raw text
//! lines with 1-based line numbers. The whole input is read once up front and
//! each detection pass re-walks it from the beginning.

use crate::error::{Error, Result};
use std::path::Path;

/// Owned, restartable sequence of source lines.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    lines: Vec<String>,
}

impl SourceBuffer {
    /// Read a source file into memory.
    ///
    /// An unreadable file is an operator fault, not a finding: the run stops
    /// here rather than producing a partial report.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::SourceOpen {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_text(&text))
    }

    /// Build a buffer from in-memory text (used heavily by tests).
    pub fn from_text(text: &str) -> Self {
        SourceBuffer {
            lines: text.lines().map(|l| l.to_string()).collect(),
        }
    }

    /// Iterate lines paired with their 1-based line number.
    ///
    /// Calling this again restarts the sequence from the first line.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, l)| (i as u32 + 1, l.as_str()))
    }

    /// Number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
