//! Engine module: sanitizing, rendering, spreadsheet I/O, archiving, and the CLI.

pub mod arg_parser;
pub mod archive;
pub mod cli;
pub mod codegen;
pub mod progress;
pub mod sanitize;
pub mod sheet;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use archive::{Archive, ArchiveBuilder, ArchiveEntry, build_archive};
pub use cli::{handle_run, layer_opts, output_path};
pub use codegen::{code_filename, make_code, normalize_code, render_code, suffixed_filename};
pub use sanitize::{sanitize, sanitize_value};
pub use sheet::{chunk_to_xlsx, load_dataset, rows_to_xlsx};
pub use tools::{arcname_relative_to, chunk_filename, is_checkpoint, path_relative_to};
