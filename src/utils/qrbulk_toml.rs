//! Load `.qrbulk.toml` (CLI only). Lib callers pass [`BatchOpts`](crate::BatchOpts) directly.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::utils::config::PackagePaths;
use crate::{CollisionPolicy, Opts};

#[derive(Debug, Default, Deserialize)]
pub struct QrbulkToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    code_column: Option<usize>,
    label_column: Option<usize>,
    chunk_size: Option<usize>,
    output: Option<String>,
    verbose: Option<bool>,
    strict: Option<bool>,
    on_collision: Option<CollisionPolicy>,
    module_size: Option<u32>,
    workdir: Option<String>,
}

/// Parse a config document. Errors carry the toml diagnostic.
pub fn parse_qrbulk_toml(s: &str) -> Result<QrbulkToml, toml::de::Error> {
    toml::from_str(s)
}

/// Load the config file from the first of `dirs` that has one. Unreadable or malformed files are
/// logged and skipped.
pub fn load_qrbulk_toml(dirs: &[&Path]) -> Option<QrbulkToml> {
    for dir in dirs {
        let path = dir.join(PackagePaths::get().config_filename());
        let Ok(s) = std::fs::read_to_string(&path) else {
            continue;
        };
        match parse_qrbulk_toml(&s) {
            Ok(cfg) => {
                log::debug!("Loaded config from {}", path.display());
                return Some(cfg);
            }
            Err(e) => log::warn!("{}: {}", path.display(), e),
        }
    }
    None
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $($opts_field:ident).+) => {
        if let Some(v) = $sec.$sec_field {
            $opts.$($opts_field).+ = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI flags.
/// A zero `chunk_size` is ignored with a warning.
pub fn apply_file_to_opts(file: &QrbulkToml, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, code_column => batch.code_column);
    apply_file_opt!(s, opts, label_column => batch.label_column);
    if let Some(n) = s.chunk_size {
        match std::num::NonZeroUsize::new(n) {
            Some(n) => opts.batch.chunk_size = n,
            None => log::warn!("chunk_size = 0 in config ignored"),
        }
    }
    if let Some(ref p) = s.output {
        opts.output = Some(PathBuf::from(p));
    }
    apply_file_opt!(s, opts, verbose => verbose);
    apply_file_opt!(s, opts, strict => batch.strict);
    apply_file_opt!(s, opts, on_collision => batch.on_collision);
    apply_file_opt!(s, opts, module_size => batch.style.module_px);
    if let Some(ref p) = s.workdir {
        opts.batch.workdir = Some(PathBuf::from(p));
    }
}
