//! Oversized datasets (large mode): split into fixed-size workbooks instead of rendering codes.

use anyhow::Result;

use crate::pipeline::{chunk_count, export_chunks};
use crate::{BatchOpts, BatchOutput, Dataset, Progress};

/// Split `dataset` into `Base_NN.xlsx` workbooks of `opts.chunk_size` rows each, bundled into a ZIP.
/// No codes are rendered. Progress is reported after each chunk.
pub fn run_partition<F>(dataset: &Dataset, opts: &BatchOpts, on_progress: F) -> Result<BatchOutput>
where
    F: FnMut(Progress),
{
    log::info!(
        "Splitting {} rows into {} files of up to {} rows",
        dataset.len(),
        chunk_count(dataset.len(), opts.chunk_size),
        opts.chunk_size
    );
    let (archive, summary) = export_chunks(dataset, opts.chunk_size, on_progress)?;
    Ok(BatchOutput { archive, summary })
}
