//! In-memory ZIP assembly.

use anyhow::{Context, Result, bail};
use std::collections::HashSet;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::engine::tools::{arcname_relative_to, path_relative_to};
use crate::utils::config::OutputNames;

/// One archive member: a file already on disk, or bytes built in memory.
#[derive(Clone, Debug)]
pub enum ArchiveEntry {
    File { source: PathBuf, name: String },
    Bytes { name: String, data: Vec<u8> },
}

impl ArchiveEntry {
    /// Disk-backed entry named relative to `base`. Errors when `source` is not under `base`.
    pub fn file_under(source: &Path, base: &Path) -> Result<Self> {
        let rel = path_relative_to(source, base).with_context(|| {
            format!("{} is not under {}", source.display(), base.display())
        })?;
        Ok(ArchiveEntry::File {
            source: source.to_path_buf(),
            name: arcname_relative_to(&rel),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            ArchiveEntry::File { name, .. } | ArchiveEntry::Bytes { name, .. } => name,
        }
    }
}

/// Finished archive. Fully buffered with the read cursor at 0; consumed once.
#[derive(Debug)]
pub struct Archive {
    cursor: Cursor<Vec<u8>>,
    entries: usize,
}

impl Archive {
    /// Number of members.
    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.get_ref().is_empty()
    }

    pub fn media_type(&self) -> &'static str {
        OutputNames::ARCHIVE_MEDIA_TYPE
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.cursor.into_inner()
    }

    /// Stream the whole archive into `w`.
    pub fn write_to<W: Write>(mut self, w: &mut W) -> Result<u64> {
        std::io::copy(&mut self.cursor, w).context("write archive")
    }
}

impl Read for Archive {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.cursor.read(buf)
    }
}

/// Incremental builder; entries keep insertion order.
pub struct ArchiveBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    names: HashSet<String>,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            names: HashSet::new(),
        }
    }

    fn start(&mut self, name: &str) -> Result<()> {
        if !self.names.insert(name.to_string()) {
            bail!("duplicate archive entry {name}");
        }
        self.zip
            .start_file(name, self.options)
            .with_context(|| format!("start archive entry {name}"))
    }

    /// Add in-memory bytes as `name`.
    pub fn add_bytes(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.start(name)?;
        self.zip
            .write_all(data)
            .with_context(|| format!("write archive entry {name}"))
    }

    /// Copy the file at `source` into the archive as `name`.
    pub fn add_file(&mut self, source: &Path, name: &str) -> Result<()> {
        let mut f = std::fs::File::open(source)
            .with_context(|| format!("open {} for archiving", source.display()))?;
        self.start(name)?;
        std::io::copy(&mut f, &mut self.zip)
            .with_context(|| format!("copy {} into archive", source.display()))?;
        Ok(())
    }

    pub fn add(&mut self, entry: &ArchiveEntry) -> Result<()> {
        match entry {
            ArchiveEntry::File { source, name } => self.add_file(source, name),
            ArchiveEntry::Bytes { name, data } => self.add_bytes(name, data),
        }
    }

    pub fn finish(self) -> Result<Archive> {
        let entries = self.names.len();
        let mut cursor = self.zip.finish().context("finalize archive")?;
        cursor.set_position(0);
        Ok(Archive { cursor, entries })
    }
}

/// Build an archive from `entries` in order.
pub fn build_archive<'a, I>(entries: I) -> Result<Archive>
where
    I: IntoIterator<Item = &'a ArchiveEntry>,
{
    let mut builder = ArchiveBuilder::new();
    for e in entries {
        builder.add(e)?;
    }
    builder.finish()
}
