//! Per-row failure routing: abort in strict mode, otherwise record and carry on.

use anyhow::Result;

use crate::RowFailure;

/// Route a per-row rendering error: strict returns it (aborting the batch), otherwise it is recorded.
pub fn handle_row_error(
    strict: bool,
    row: usize,
    err: anyhow::Error,
    failures: &mut Vec<RowFailure>,
) -> Result<()> {
    if strict {
        return Err(err.context(format!("row {}", display_row(row))));
    }
    let reason = format!("{:#}", err);
    log::debug!("row {}: {}", display_row(row), reason);
    failures.push(RowFailure { row, reason });
    Ok(())
}

/// Warn once about recorded failures; each one is listed at debug level.
pub fn report_row_failures(failures: &[RowFailure]) {
    if failures.is_empty() {
        return;
    }
    log::warn!(
        "{} row{} could not be rendered and were left out of the archive",
        failures.len(),
        if failures.len() == 1 { "" } else { "s" }
    );
    for f in failures {
        log::debug!("  row {}: {}", display_row(f.row), f.reason);
    }
}

/// Spreadsheet row number for a 0-based data row (header is row 1).
pub fn display_row(row: usize) -> usize {
    row + 2
}
