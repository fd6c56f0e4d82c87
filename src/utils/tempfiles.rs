//! Per-cycle scratch directory for generated images.

use anyhow::{Context, Result};
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

use crate::engine::archive::Archive;
use crate::utils::config::PackagePaths;

/// Scoped working directory: created fresh for one cycle, removed (with everything in it) on drop.
///
/// Generated images live directly under [`Workspace::path`], which is also the base the archive
/// names are computed against, so archives come out flat.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a new workspace under `parent`, or under the system temp dir when `None`.
    pub fn create(parent: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(PackagePaths::get().workspace_prefix());
        let dir = match parent {
            Some(p) => {
                std::fs::create_dir_all(p)
                    .with_context(|| format!("create workspace parent {}", p.display()))?;
                builder
                    .tempdir_in(p)
                    .with_context(|| format!("create workspace in {}", p.display()))?
            }
            None => builder.tempdir().context("create workspace in temp dir")?,
        };
        log::debug!("Workspace: {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory now and report failures (drop ignores them).
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .with_context(|| format!("remove workspace {}", path.display()))
    }
}

/// Write `archive` to a temp file next to `dest`, then rename it over `dest`. Returns bytes written.
pub fn write_archive(archive: Archive, dest: &Path) -> Result<u64> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    let written = archive.write_to(tmp.as_file_mut())?;
    tmp.persist(dest).with_context(|| {
        format!(
            "atomic rename temp archive to final path ({})",
            dest.display()
        )
    })?;
    Ok(written)
}
