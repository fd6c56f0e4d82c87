//! Code generation (normal mode): one QR image per row, bundled into a ZIP.

use anyhow::Result;
use log::debug;

use crate::engine::archive::{ArchiveEntry, build_archive};
use crate::pipeline::{generate_artifacts, records, report_row_failures, resolve_columns};
use crate::utils::Workspace;
use crate::{BatchOpts, BatchOutput, Dataset, Progress};

/// Render every row of `dataset` into `workspace` and archive the images.
///
/// Column positions come from `opts` (1-based); either one out of range fails before anything is
/// written. Rows with a blank code are skipped. With `opts.strict` the first rendering error
/// aborts the run; otherwise failing rows are listed in the summary.
pub fn run_generate<F>(
    dataset: &Dataset,
    opts: &BatchOpts,
    workspace: &Workspace,
    on_progress: F,
) -> Result<BatchOutput>
where
    F: FnMut(Progress),
{
    let cols = resolve_columns(dataset, opts.code_column, opts.label_column)?;
    debug!(
        "Code column: {:?} (#{}), label column: {:?} (#{})",
        cols.code_name, opts.code_column, cols.label_name, opts.label_column
    );

    let artifacts = generate_artifacts(
        records(dataset, &cols),
        workspace.path(),
        opts,
        on_progress,
    )?;
    report_row_failures(&artifacts.summary.failures);

    let entries = artifacts
        .paths
        .iter()
        .map(|p| ArchiveEntry::file_under(p, workspace.path()))
        .collect::<Result<Vec<_>>>()?;
    let archive = build_archive(&entries)?;

    let mut summary = artifacts.summary;
    summary.entries = archive.entries();
    debug!(
        "Generated {} codes ({} skipped, {} collisions)",
        summary.produced, summary.skipped, summary.collisions
    );
    Ok(BatchOutput { archive, summary })
}
