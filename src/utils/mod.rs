pub mod config;
pub mod logger;
pub mod qrbulk_toml;
pub mod tempfiles;

pub use config::*;
pub use logger::{Colors, set_verbose, setup_logging};
pub use qrbulk_toml::{QrbulkToml, apply_file_to_opts, load_qrbulk_toml, parse_qrbulk_toml};
pub use tempfiles::{Workspace, write_archive};
