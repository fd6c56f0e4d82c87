use clap::Parser;
use std::path::PathBuf;

use crate::CollisionPolicy;
use crate::utils::config::CodeStyleConsts;

/// Batch QR code generator for spreadsheets.
#[derive(Clone, Parser)]
#[command(name = "qrbulk")]
#[command(
    about = "Render one QR code per spreadsheet row into a ZIP; sheets over the threshold are split into smaller workbooks instead."
)]
pub struct Cli {
    /// Spreadsheet to read (.xlsx, .xls, .xlsm, .xlsb, .ods). First row is the header.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Position (1-based) of the column holding the codes. Default: 1.
    #[arg(long, short = 'c', value_parser = clap::value_parser!(u64).range(1..))]
    pub code_column: Option<u64>,

    /// Position (1-based) of the column holding the labels. Default: 2.
    #[arg(long, short = 'l', value_parser = clap::value_parser!(u64).range(1..))]
    pub label_column: Option<u64>,

    /// Archive to write. Default: qr_codes.zip (codes) or bases.zip (split files).
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Row threshold above which the sheet is split instead, and the rows per split file. Default: 10000.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub chunk_size: Option<u64>,

    /// Load the sheet and report row count and mode; write nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output with progress bar. A value must be attached: `--verbose=false`.
    #[arg(long, short = 'v', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Strict mode: abort on the first row that fails to render. Default: true. Turn off with `--strict=false`.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub strict: Option<bool>,

    /// What to do when two rows map to the same file name.
    #[arg(long, value_enum)]
    pub on_collision: Option<CollisionPolicy>,

    /// Pixels per QR module. Default: 10.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=CodeStyleConsts::MODULE_PX_MAX as i64))]
    pub module_size: Option<u32>,

    /// Directory in which the temporary working directory is created. Default: system temp dir.
    #[arg(long)]
    pub workdir: Option<PathBuf>,

    /// Print the run summary as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}
