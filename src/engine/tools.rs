//! Path and naming utilities

use std::path::{Path, PathBuf};

use crate::utils::config::OutputNames;

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Archive member name for a relative path: components joined with `/` on every platform.
pub fn arcname_relative_to(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// `Base_01.xlsx`, `Base_02.xlsx`, ... (numbers past 99 simply grow).
pub fn chunk_filename(number: usize) -> String {
    format!(
        "{}_{:0width$}.{}",
        OutputNames::CHUNK_PREFIX,
        number,
        OutputNames::CHUNK_EXT,
        width = OutputNames::CHUNK_NUMBER_WIDTH
    )
}

/// True at progress checkpoints: every `every` items and on the last one. `done` is 1-based.
pub fn is_checkpoint(done: usize, total: usize, every: usize) -> bool {
    done == total || (every > 0 && done.is_multiple_of(every))
}
