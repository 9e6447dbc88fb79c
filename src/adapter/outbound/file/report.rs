//! CSV report writer.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::ReportRow;
use crate::error::Result;
use crate::port::outbound::report::ReportSink;

const HEADER: &str = "Address,Balance,Whitelist Recommendation,Related Addresses,Risk Score\n";

/// Writes one CSV line per row, in input order.
#[derive(Debug, Clone)]
pub struct CsvReportWriter {
    path: PathBuf,
}

impl CsvReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Render rows as CSV text, header included.
#[must_use]
pub fn render_csv(rows: &[ReportRow]) -> String {
    let mut csv = String::from(HEADER);
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            quote(row.address.as_str()),
            quote(&row.balance.to_string()),
            quote(&row.recommendation.to_string()),
            quote(&row.related_display()),
            quote(&row.risk_display()),
        ));
    }
    csv
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

impl ReportSink for CsvReportWriter {
    fn write(&self, rows: &[ReportRow]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, render_csv(rows))?;
        info!(path = %self.path.display(), rows = rows.len(), "Report written");
        Ok(())
    }
}
