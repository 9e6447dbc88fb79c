//! Address list reader.
//!
//! One entry per line; only the first comma-separated field counts. A line
//! starting with `Cluster` opens a new label (a trailing `:` is dropped),
//! every other non-blank line is an address under the current label.

use std::path::Path;

use tracing::debug;

use crate::domain::{Address, InputEntry};
use crate::error::{Error, Result};

const LABEL_PREFIX: &str = "Cluster";

/// Parse an address list from text.
#[must_use]
pub fn parse_entries(text: &str) -> Vec<InputEntry> {
    text.lines()
        .filter_map(|line| {
            let field = line.split(',').next().unwrap_or_default();
            let field = field.trim().trim_matches('"').trim();
            if field.is_empty() {
                return None;
            }
            if field.starts_with(LABEL_PREFIX) {
                return Some(InputEntry::Label(field.trim_end_matches(':').trim().to_string()));
            }
            Some(InputEntry::Address(Address::new(field)))
        })
        .collect()
}

/// Read and parse the address list at `path`.
///
/// # Errors
///
/// [`Error::Input`] if the file cannot be read.
pub fn read_entries(path: &Path) -> Result<Vec<InputEntry>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Input(format!("cannot read {}: {e}", path.display())))?;
    let entries = parse_entries(&text);
    debug!(path = %path.display(), entries = entries.len(), "Address list read");
    Ok(entries)
}
