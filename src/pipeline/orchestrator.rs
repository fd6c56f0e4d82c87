//! Mode selection, the per-row generation loop, and chunk export.

use anyhow::Result;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::engine::archive::{Archive, ArchiveBuilder};
use crate::engine::codegen::{code_filename, render_code, suffixed_filename};
use crate::engine::sheet::chunk_to_xlsx;
use crate::engine::tools::{chunk_filename, is_checkpoint};
use crate::pipeline::error_handler::{display_row, handle_row_error};
use crate::pipeline::splitter::split;
use crate::utils::config::PROGRESS_EVERY_ROWS;
use crate::{BatchOpts, CollisionPolicy, Dataset, Mode, Progress, ProgressUnit, Record, Summary};

/// Mode for a dataset of `rows` rows: strictly more than `threshold` is [`Mode::Large`].
pub fn classify(rows: usize, threshold: NonZeroUsize) -> Mode {
    if rows > threshold.get() {
        Mode::Large
    } else {
        Mode::Normal
    }
}

/// Names held by rendered files in one generation run, so collisions are seen before writing.
#[derive(Default)]
struct ArtifactNames {
    used: HashSet<String>,
}

/// Outcome of claiming a name.
enum Claim {
    /// First use; add to the archive.
    Fresh(String),
    /// Same name as an earlier record; the file is overwritten and not added again.
    Overwrite(String),
}

impl ArtifactNames {
    fn claim(&mut self, base: String, policy: CollisionPolicy) -> (Claim, bool) {
        if self.used.insert(base.clone()) {
            return (Claim::Fresh(base), false);
        }
        match policy {
            CollisionPolicy::Overwrite => (Claim::Overwrite(base), true),
            CollisionPolicy::Suffix => {
                let mut n = 1;
                loop {
                    n += 1;
                    let candidate = suffixed_filename(&base, n);
                    if self.used.insert(candidate.clone()) {
                        return (Claim::Fresh(candidate), true);
                    }
                }
            }
        }
    }

    /// Give a fresh name back after its render failed.
    fn release(&mut self, name: &str) {
        self.used.remove(name);
    }
}

/// Files written by a generation run, in the order they first appeared.
#[derive(Debug, Default)]
pub struct Artifacts {
    pub paths: Vec<PathBuf>,
    pub summary: Summary,
}

/// Render every record into `output_dir`. Progress every [`PROGRESS_EVERY_ROWS`] rows and on
/// the last one. Skipped rows (blank code) count as processed.
pub fn generate_artifacts<I, F>(
    records: I,
    output_dir: &Path,
    opts: &BatchOpts,
    mut on_progress: F,
) -> Result<Artifacts>
where
    I: ExactSizeIterator<Item = Record>,
    F: FnMut(Progress),
{
    let total = records.len();
    let mut names = ArtifactNames::default();
    let mut out = Artifacts {
        summary: Summary {
            rows: total,
            ..Default::default()
        },
        ..Default::default()
    };

    for (i, rec) in records.enumerate() {
        match rec.code.as_deref() {
            None => out.summary.skipped += 1,
            Some(code) => {
                let (claim, collided) =
                    names.claim(code_filename(code, &rec.label), opts.on_collision);
                let (name, is_new) = match claim {
                    Claim::Fresh(n) => (n, true),
                    Claim::Overwrite(n) => {
                        log::warn!(
                            "row {}: {} already produced by an earlier row; overwriting",
                            display_row(rec.row),
                            n
                        );
                        (n, false)
                    }
                };
                let path = output_dir.join(&name);
                match render_code(code, &path, &opts.style) {
                    Ok(()) => {
                        out.summary.produced += 1;
                        if collided {
                            out.summary.collisions += 1;
                        }
                        if is_new {
                            out.paths.push(path);
                        }
                    }
                    Err(e) => {
                        if is_new {
                            names.release(&name);
                        }
                        handle_row_error(opts.strict, rec.row, e, &mut out.summary.failures)?
                    }
                }
            }
        }
        if is_checkpoint(i + 1, total, PROGRESS_EVERY_ROWS) {
            on_progress(Progress {
                done: i + 1,
                total,
                unit: ProgressUnit::Rows,
            });
        }
    }
    Ok(out)
}

/// Write every chunk of `dataset` as a workbook into a fresh archive, reporting after each chunk.
pub fn export_chunks<F>(
    dataset: &Dataset,
    chunk_size: NonZeroUsize,
    mut on_progress: F,
) -> Result<(Archive, Summary)>
where
    F: FnMut(Progress),
{
    let chunks = split(dataset, chunk_size);
    let total = chunks.len();
    let mut builder = ArchiveBuilder::new();
    for chunk in &chunks {
        let name = chunk_filename(chunk.number);
        let bytes = chunk_to_xlsx(chunk)?;
        builder.add_bytes(&name, &bytes)?;
        log::debug!("{}: {} rows", name, chunk.len());
        on_progress(Progress {
            done: chunk.number,
            total,
            unit: ProgressUnit::Chunks,
        });
    }
    let archive = builder.finish()?;
    let summary = Summary {
        rows: dataset.len(),
        produced: total,
        entries: archive.entries(),
        ..Default::default()
    };
    Ok((archive, summary))
}
