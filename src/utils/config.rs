//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
    workspace_prefix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
                workspace_prefix: format!("{pkg}-"),
            }
        })
    }

    /// `.qrbulk.toml`
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Prefix for per-cycle temp directories.
    pub fn workspace_prefix(&self) -> &str {
        &self.workspace_prefix
    }
}

// ---- Batching ----

/// Datasets with more rows than this are split instead of rendered. Also the chunk size.
pub const CHUNK_THRESHOLD: usize = 10_000;

/// Progress is reported every this many rows during generation (and on the last row).
pub const PROGRESS_EVERY_ROWS: usize = 100;

// ---- Output names ----

/// File and archive naming.
pub struct OutputNames;

impl OutputNames {
    /// Prefix of every generated image name.
    pub const CODE_PREFIX: &'static str = "qr";
    pub const CODE_EXT: &'static str = "png";
    /// Prefix of every chunk workbook name.
    pub const CHUNK_PREFIX: &'static str = "Base";
    pub const CHUNK_EXT: &'static str = "xlsx";
    /// Digits the chunk number is zero-padded to.
    pub const CHUNK_NUMBER_WIDTH: usize = 2;
    /// Default archive name for generated codes.
    pub const CODES_ARCHIVE: &'static str = "qr_codes.zip";
    /// Default archive name for chunk workbooks.
    pub const CHUNKS_ARCHIVE: &'static str = "bases.zip";
    pub const ARCHIVE_MEDIA_TYPE: &'static str = "application/zip";
    /// Sheet name used in chunk workbooks.
    pub const CHUNK_SHEET: &'static str = "Sheet1";
}

// ---- Rendering ----

pub struct CodeStyleConsts;

impl CodeStyleConsts {
    /// Pixels per QR module.
    pub const MODULE_PX: u32 = 10;
    /// Upper bound accepted from config / CLI (keeps a 177-module code under ~18k px).
    pub const MODULE_PX_MAX: u32 = 100;
}
