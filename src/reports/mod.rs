//! Consumers of a finished pipeline run: the report workbook, the
//! latest-period bar chart and the latest-period table.

pub mod chart;
pub mod export;
pub mod table;

pub use chart::{render_bar_chart, ChartArtifact};
pub use export::{ReportCell, ReportSheet, ReportWorkbook};
pub use table::{TableRow, TableView, VisualizationResult};

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Write `bytes` next to `dest` first and rename on success, so a failed
/// write never leaves a truncated artifact at `dest`.
pub(crate) fn write_atomically(dest: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_dest = dest.with_extension(format!(
        "{}.tmp",
        dest.extension().and_then(|e| e.to_str()).unwrap_or("")
    ));

    let result = (|| -> Result<()> {
        fs::write(&tmp_dest, bytes)?;
        fs::rename(&tmp_dest, dest)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_dest);
    }

    result
}
