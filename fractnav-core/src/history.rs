//! Append-only log of every plane viewport visited in a session.
//!
//! The on-disk form is one line per viewport, `x1 x2 y1 y2` with fifteen
//! decimals, oldest first. Sequence numbers are not part of the file: a
//! reloaded history is renumbered from zero in line order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CoreError;

/// One accepted plane viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomHistoryEntry {
    pub sequence_number: u64,
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

impl ZoomHistoryEntry {
    /// The line written to the history file.
    pub fn to_line(&self) -> String {
        format!("{:.15} {:.15} {:.15} {:.15}", self.x1, self.x2, self.y1, self.y2)
    }
}

impl std::fmt::Display for ZoomHistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "frame {}: x1={:.15} x2={:.15} y1={:.15} y2={:.15}",
            self.sequence_number, self.x1, self.x2, self.y1, self.y2
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoomHistory {
    entries: Vec<ZoomHistoryEntry>,
}

impl ZoomHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a viewport, numbered one past the last entry (0 when empty).
    pub fn append(&mut self, x1: f64, x2: f64, y1: f64, y2: f64) -> &ZoomHistoryEntry {
        let sequence_number = self.entries.last().map_or(0, |e| e.sequence_number + 1);
        self.entries.push(ZoomHistoryEntry {
            sequence_number,
            x1,
            x2,
            y1,
            y2,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[ZoomHistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoomHistoryEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&ZoomHistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn serialize(&self) -> Vec<String> {
        self.entries.iter().map(ZoomHistoryEntry::to_line).collect()
    }

    /// Rebuild a history from file lines. Lines that do not hold four
    /// floating-point numbers are skipped.
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut history = Self::new();
        for (lineno, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            match parse_bounds(line) {
                Some([x1, x2, y1, y2]) => {
                    history.append(x1, x2, y1, y2);
                }
                None => warn!(line = lineno + 1, "Skipping malformed history line: {line:?}"),
            }
        }
        history
    }

    /// Read a history file. A missing or unreadable file gives an empty history.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => {
                let history = Self::parse(text.lines());
                debug!("Loaded {} history entries from {}", history.len(), path.display());
                history
            }
            Err(e) => {
                debug!("No history at {}: {e}", path.display());
                Self::new()
            }
        }
    }

    /// Overwrite `path` with the full history.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let mut text = self.serialize().join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        fs::write(path, text).map_err(|source| CoreError::HistoryWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn parse_bounds(line: &str) -> Option<[f64; 4]> {
    let mut fields = line.split_whitespace().map(str::parse::<f64>);
    let mut out = [0.0; 4];
    for slot in &mut out {
        *slot = fields.next()?.ok()?;
    }
    if fields.next().is_some() {
        return None;
    }
    Some(out)
}

impl<'a> IntoIterator for &'a ZoomHistory {
    type Item = &'a ZoomHistoryEntry;
    type IntoIter = std::slice::Iter<'a, ZoomHistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
