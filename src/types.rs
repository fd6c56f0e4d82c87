//! Public and internal types for the qrbulk API and pipeline.

use serde::Serialize;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::engine::archive::Archive;
use crate::utils::config::{CHUNK_THRESHOLD, CodeStyleConsts};

/// One spreadsheet value. Dates arrive as their serial number, error cells as their error text.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Textual form with surrounding whitespace removed. `None` for empty cells.
    pub fn trimmed_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            other => Some(other.to_string().trim().to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{i}"),
            // Short codes stored as numbers come back as floats; 12345.0 must read as 12345.
            Cell::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 => {
                write!(f, "{}", *x as i64)
            }
            Cell::Float(x) => write!(f, "{x}"),
            Cell::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Int(i)
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self {
        Cell::Float(x)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Empty)
    }
}

/// One data row; cells line up with [`Dataset::columns`].
pub type Row = Vec<Cell>;

/// Parsed sheet: header names plus data rows in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset. Short rows are padded with [`Cell::Empty`] so every row has one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut r| {
                if r.len() < width {
                    r.resize(width, Cell::Empty);
                }
                r
            })
            .collect();
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (`row`, `col`), both 0-based. Out-of-range reads as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}

/// One (code, label) pair taken from a dataset row. `code` is already trimmed; `None` when missing or blank.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// 0-based data row index (header excluded).
    pub row: usize,
    pub code: Option<String>,
    pub label: String,
}

/// Contiguous run of rows produced by [`split`](crate::pipeline::split). Borrows from the dataset.
#[derive(Clone, Copy, Debug)]
pub struct Chunk<'a> {
    /// 1-based chunk number in slice order.
    pub number: usize,
    pub columns: &'a [String],
    pub rows: &'a [Row],
}

impl Chunk<'_> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Processing mode chosen from the row count before any side effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Render one code per row.
    Normal,
    /// Too many rows: split into chunk workbooks instead.
    Large,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => f.write_str("normal"),
            Mode::Large => f.write_str("large"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressUnit {
    Rows,
    Chunks,
}

/// Progress checkpoint handed to the caller's callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
    pub unit: ProgressUnit,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.done, self.total)
    }
}

/// What to do when two records sanitize to the same file name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Last write wins; the archive carries the name once. Logs a warning.
    #[default]
    Overwrite,
    /// Append `_2`, `_3`, ... before the extension.
    Suffix,
}

/// A row whose code could not be rendered (non-strict mode only).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowFailure {
    pub row: usize,
    pub reason: String,
}

/// Rendering knobs for the code generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeStyle {
    /// Edge length of one QR module in pixels.
    pub module_px: u32,
}

impl Default for CodeStyle {
    fn default() -> Self {
        Self {
            module_px: CodeStyleConsts::MODULE_PX,
        }
    }
}

/// Lib options for one cycle. Column positions are 1-based, as a spreadsheet user counts them.
#[derive(Clone, Debug)]
pub struct BatchOpts {
    pub code_column: usize,
    pub label_column: usize,
    /// Mode threshold and chunk size.
    pub chunk_size: NonZeroUsize,
    /// Abort on the first rendering error. When false, failures are recorded per row.
    pub strict: bool,
    pub on_collision: CollisionPolicy,
    pub style: CodeStyle,
    /// Parent for the per-cycle workspace. None uses the system temp dir.
    pub workdir: Option<PathBuf>,
}

impl Default for BatchOpts {
    fn default() -> Self {
        Self {
            code_column: 1,
            label_column: 2,
            chunk_size: NonZeroUsize::new(CHUNK_THRESHOLD).unwrap_or(NonZeroUsize::MIN),
            strict: true,
            on_collision: CollisionPolicy::default(),
            style: CodeStyle::default(),
            workdir: None,
        }
    }
}

/// Full options (CLI). Use [`BatchOpts`] for lib.
#[derive(Clone, Debug, Default)]
pub struct Opts {
    pub batch: BatchOpts,
    /// Archive destination. None picks the mode's default name in the current directory.
    pub output: Option<PathBuf>,
    /// Show progress bar and debug logs.
    pub verbose: bool,
    /// Load and classify only.
    pub dry_run: bool,
    /// Print the summary as JSON on stdout.
    pub json: bool,
}

/// Counters for one cycle, reported by the CLI.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub rows: usize,
    /// Images written (Normal) or workbooks written (Large).
    pub produced: usize,
    /// Rows with empty or missing code.
    pub skipped: usize,
    /// Rendered rows whose name was already taken by an earlier rendered row.
    pub collisions: usize,
    pub failures: Vec<RowFailure>,
    pub entries: usize,
}

/// Result of one trigger: the finished archive and its counters.
#[derive(Debug)]
pub struct BatchOutput {
    pub archive: Archive,
    pub summary: Summary,
}

/// Result of [`run_cycle`](crate::run_cycle).
#[derive(Debug)]
pub struct CycleOutcome {
    pub mode: Mode,
    pub archive: Archive,
    pub summary: Summary,
}
