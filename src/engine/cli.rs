//! CLI command handler: load, classify, then generate codes or split the sheet.

use anyhow::{Result, bail};
use log::{debug, info, warn};
use serde::Serialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::engine::arg_parser::Cli;
use crate::engine::progress::progress_callback;
use crate::pipeline::{chunk_count, classify, resolve_columns};
use crate::utils::config::{CodeStyleConsts, OutputNames};
use crate::utils::{
    Colors, QrbulkToml, apply_file_to_opts, load_qrbulk_toml, set_verbose, setup_logging,
    write_archive,
};
use crate::{CycleOutcome, Mode, Opts, Summary, load_dataset, run_cycle};

/// Overwrite opts field from CLI when the flag was given.
macro_rules! apply_cli_opt {
    ($cli:expr, $opts:expr, $cli_field:ident => $($opts_field:ident).+) => {
        if let Some(v) = $cli.$cli_field {
            $opts.$($opts_field).+ = v;
        }
    };
}

/// Set up logging, find `.qrbulk.toml` (input dir, then cwd), and layer the options.
fn setup_opts(cli: &Cli) -> Result<Opts> {
    setup_logging(cli.verbose.unwrap_or(false));
    let input_dir = match cli.input.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file = load_qrbulk_toml(&[input_dir, Path::new(".")]);
    let opts = layer_opts(cli, file.as_ref())?;
    set_verbose(opts.verbose);
    Ok(opts)
}

/// Defaults, then `file` settings, then CLI flags. Fails on an out-of-range module size.
pub fn layer_opts(cli: &Cli, file: Option<&QrbulkToml>) -> Result<Opts> {
    let mut opts = Opts::default();
    if let Some(file) = file {
        apply_file_to_opts(file, &mut opts);
    }

    if let Some(c) = cli.code_column {
        opts.batch.code_column = usize::try_from(c)?;
    }
    if let Some(c) = cli.label_column {
        opts.batch.label_column = usize::try_from(c)?;
    }
    if let Some(n) = cli.chunk_size
        && let Some(n) = NonZeroUsize::new(usize::try_from(n)?)
    {
        opts.batch.chunk_size = n;
    }
    if cli.output.is_some() {
        opts.output = cli.output.clone();
    }
    if cli.workdir.is_some() {
        opts.batch.workdir = cli.workdir.clone();
    }
    apply_cli_opt!(cli, opts, verbose => verbose);
    apply_cli_opt!(cli, opts, strict => batch.strict);
    apply_cli_opt!(cli, opts, on_collision => batch.on_collision);
    apply_cli_opt!(cli, opts, module_size => batch.style.module_px);
    opts.dry_run = cli.dry_run;
    opts.json = cli.json;

    let px = opts.batch.style.module_px;
    if px == 0 || px > CodeStyleConsts::MODULE_PX_MAX {
        bail!(
            "module size must be between 1 and {} pixels (got {})",
            CodeStyleConsts::MODULE_PX_MAX,
            px
        );
    }
    Ok(opts)
}

/// Archive path: explicit output, else the mode's default name in the current directory.
pub fn output_path(opts: &Opts, mode: Mode) -> PathBuf {
    opts.output.clone().unwrap_or_else(|| {
        PathBuf::from(match mode {
            Mode::Normal => OutputNames::CODES_ARCHIVE,
            Mode::Large => OutputNames::CHUNKS_ARCHIVE,
        })
    })
}

#[derive(Serialize)]
struct Report<'a> {
    input: &'a Path,
    mode: Mode,
    dry_run: bool,
    output: Option<&'a Path>,
    #[serde(flatten)]
    summary: &'a Summary,
}

/// Load and classify only. Column positions are still checked in normal mode.
fn handle_dry_run(cli: &Cli, opts: &Opts) -> Result<()> {
    warn!("DRY-RUN: NOTHING WILL BE WRITTEN.");
    let dataset = load_dataset(&cli.input)?;
    let mode = classify(dataset.len(), opts.batch.chunk_size);
    match mode {
        Mode::Normal => {
            let cols = resolve_columns(&dataset, opts.batch.code_column, opts.batch.label_column)?;
            info!(
                "{} rows -> {} mode: would generate codes from {:?} labelled by {:?}",
                dataset.len(),
                mode,
                cols.code_name,
                cols.label_name
            );
        }
        Mode::Large => info!(
            "{} rows -> {} mode: would split into {} files of up to {} rows",
            dataset.len(),
            mode,
            chunk_count(dataset.len(), opts.batch.chunk_size),
            opts.batch.chunk_size
        ),
    }
    if opts.json {
        let summary = Summary {
            rows: dataset.len(),
            ..Default::default()
        };
        print_json(&Report {
            input: &cli.input,
            mode,
            dry_run: true,
            output: None,
            summary: &summary,
        })?;
    }
    Ok(())
}

fn print_json(report: &Report<'_>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Print summary
fn print_summary(mode: Mode, summary: &Summary, dest: &Path) {
    match mode {
        Mode::Normal => info!(
            "{} | {} | {}",
            Colors::colorize(
                Colors::PRODUCED,
                &format!("Generated: {}", summary.produced)
            ),
            Colors::colorize(Colors::SKIPPED, &format!("Skipped: {}", summary.skipped)),
            Colors::colorize(
                Colors::FAILED,
                &format!("Failed: {}", summary.failures.len())
            )
        ),
        Mode::Large => info!(
            "{} ({} rows). Generate codes from each file separately.",
            Colors::colorize(
                Colors::PRODUCED,
                &format!("Split into {} files", summary.produced)
            ),
            summary.rows
        ),
    }
    info!("Archive written to {}", dest.display());
}

/// Run one cycle: load, classify, generate or split, write the archive.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli)?;
    if opts.dry_run {
        return handle_dry_run(cli, &opts);
    }

    let CycleOutcome {
        mode,
        archive,
        summary,
    } = run_cycle(&cli.input, &opts.batch, progress_callback(opts.verbose))?;
    if mode == Mode::Large {
        warn!(
            "{} rows exceeded the {}-row limit; the sheet was split instead of generating codes",
            summary.rows, opts.batch.chunk_size
        );
    }

    let dest = output_path(&opts, mode);
    debug!(
        "Writing {} entries ({}) to {}",
        archive.entries(),
        archive.media_type(),
        dest.display()
    );
    let bytes = write_archive(archive, &dest)?;
    debug!("{} bytes written", bytes);

    if opts.json {
        print_json(&Report {
            input: &cli.input,
            mode,
            dry_run: false,
            output: Some(&dest),
            summary: &summary,
        })?;
    } else {
        print_summary(mode, &summary, &dest);
    }
    Ok(())
}
