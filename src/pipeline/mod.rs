//! Pipeline components: column resolution, splitting, the generation loop, error handling.

pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod splitter;

pub use context::{ResolvedColumns, records, resolve_column, resolve_columns};
pub use error_handler::{display_row, handle_row_error, report_row_failures};
pub use orchestrator::{Artifacts, classify, export_chunks, generate_artifacts};
pub use splitter::{chunk_count, split};
