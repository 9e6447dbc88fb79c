//! Output collaborator port.

use crate::domain::ReportRow;
use crate::error::Result;

/// Receives the final per-address rows once scoring is complete.
pub trait ReportSink {
    fn write(&self, rows: &[ReportRow]) -> Result<()>;
}
