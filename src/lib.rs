//! qrbulk: batch QR code generation from spreadsheets, with oversized sheets split into chunks.

pub mod engine;
pub mod generate;
pub mod partition;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use engine::archive::{Archive, ArchiveBuilder, ArchiveEntry, build_archive};
pub use engine::codegen::make_code;
pub use engine::sanitize::{sanitize, sanitize_value};
pub use engine::sheet::load_dataset;
pub use generate::run_generate;
pub use partition::run_partition;
pub use pipeline::{classify, split};
pub use utils::Workspace;
pub use utils::config::CHUNK_THRESHOLD;

use log::debug;
use std::path::Path;

/// Result alias used by public qrbulk API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: load `input`, pick the mode, and run the matching trigger.
///
/// - **[`Mode::Normal`]** → codes are rendered into a fresh [`Workspace`] (under `opts.workdir`
///   when set), archived, and the workspace is removed before returning.
/// - **[`Mode::Large`]** → the sheet is split into `Base_NN.xlsx` workbooks; no codes are rendered.
///
/// `on_progress` is called synchronously at each checkpoint (every 100 rows, or every chunk).
pub fn run_cycle<F>(input: &Path, opts: &BatchOpts, on_progress: F) -> Result<CycleOutcome>
where
    F: FnMut(Progress),
{
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    let dataset = load_dataset(input)?;
    let mode = classify(dataset.len(), opts.chunk_size);
    debug!("{} rows -> {} mode", dataset.len(), mode);

    let BatchOutput { archive, summary } = match mode {
        Mode::Large => run_partition(&dataset, opts, on_progress)?,
        Mode::Normal => {
            let workspace = Workspace::create(opts.workdir.as_deref())?;
            let out = run_generate(&dataset, opts, &workspace, on_progress)?;
            workspace.close()?;
            out
        }
    };
    Ok(CycleOutcome {
        mode,
        archive,
        summary,
    })
}
