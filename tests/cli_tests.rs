//! CLI tests: argument parsing, option layering, archive output.

use clap::Parser;
use qrbulk::engine::{Cli, layer_opts, output_path};
use qrbulk::utils::{parse_qrbulk_toml, write_archive};
use qrbulk::{ArchiveBuilder, CollisionPolicy, Mode};
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("qrbulk").chain(args.iter().copied())).unwrap()
}

fn parse_err(args: &[&str]) -> bool {
    Cli::try_parse_from(std::iter::once("qrbulk").chain(args.iter().copied())).is_err()
}

// --- argument parsing ---

#[test]
fn test_verbose_before_input() {
    let cli = parse(&["-v", "in.xlsx"]);
    assert_eq!(cli.verbose, Some(true));
    assert_eq!(cli.input, PathBuf::from("in.xlsx"));
}

#[test]
fn test_verbose_after_input() {
    let cli = parse(&["in.xlsx", "--verbose"]);
    assert_eq!(cli.verbose, Some(true));
    assert_eq!(cli.input, PathBuf::from("in.xlsx"));
}

#[test]
fn test_strict_before_input() {
    let cli = parse(&["--strict", "in.xlsx"]);
    assert_eq!(cli.strict, Some(true));
    assert_eq!(cli.input, PathBuf::from("in.xlsx"));
}

#[test]
fn test_bool_flags_take_attached_value() {
    let cli = parse(&["--strict=false", "--verbose=false", "in.xlsx"]);
    assert_eq!(cli.strict, Some(false));
    assert_eq!(cli.verbose, Some(false));
}

#[test]
fn test_unset_flags_are_none() {
    let cli = parse(&["in.xlsx"]);
    assert_eq!(cli.verbose, None);
    assert_eq!(cli.strict, None);
    assert_eq!(cli.code_column, None);
    assert_eq!(cli.on_collision, None);
    assert!(!cli.dry_run);
    assert!(!cli.json);
}

#[test]
fn test_value_flags() {
    let cli = parse(&[
        "-c",
        "3",
        "-l",
        "4",
        "--chunk-size",
        "500",
        "--on-collision",
        "suffix",
        "--module-size",
        "4",
        "-o",
        "out.zip",
        "in.xlsx",
    ]);
    assert_eq!(cli.code_column, Some(3));
    assert_eq!(cli.label_column, Some(4));
    assert_eq!(cli.chunk_size, Some(500));
    assert_eq!(cli.on_collision, Some(CollisionPolicy::Suffix));
    assert_eq!(cli.module_size, Some(4));
    assert_eq!(cli.output, Some(PathBuf::from("out.zip")));
}

#[test]
fn test_out_of_range_values_rejected() {
    assert!(parse_err(&["-c", "0", "in.xlsx"]));
    assert!(parse_err(&["-l", "0", "in.xlsx"]));
    assert!(parse_err(&["--chunk-size", "0", "in.xlsx"]));
    assert!(parse_err(&["--module-size", "0", "in.xlsx"]));
    assert!(parse_err(&["--module-size", "101", "in.xlsx"]));
    assert!(parse_err(&["--on-collision", "rename", "in.xlsx"]));
}

#[test]
fn test_input_required() {
    assert!(parse_err(&[]));
    assert!(parse_err(&["-v"]));
}

// --- option layering ---

#[test]
fn test_layer_defaults_without_file() {
    let opts = layer_opts(&parse(&["in.xlsx"]), None).unwrap();
    assert_eq!(opts.batch.code_column, 1);
    assert_eq!(opts.batch.label_column, 2);
    assert_eq!(opts.batch.chunk_size.get(), 10_000);
    assert!(opts.batch.strict);
    assert_eq!(opts.batch.on_collision, CollisionPolicy::Overwrite);
    assert!(!opts.verbose);
    assert_eq!(opts.output, None);
}

#[test]
fn test_layer_file_over_defaults() {
    let file = parse_qrbulk_toml(
        "[settings]\ncode_column = 3\nstrict = false\non_collision = \"suffix\"\noutput = \"codes.zip\"\n",
    )
    .unwrap();
    let opts = layer_opts(&parse(&["in.xlsx"]), Some(&file)).unwrap();
    assert_eq!(opts.batch.code_column, 3);
    assert_eq!(opts.batch.label_column, 2);
    assert!(!opts.batch.strict);
    assert_eq!(opts.batch.on_collision, CollisionPolicy::Suffix);
    assert_eq!(opts.output, Some(PathBuf::from("codes.zip")));
}

#[test]
fn test_layer_cli_over_file() {
    let file = parse_qrbulk_toml(
        "[settings]\ncode_column = 3\nstrict = false\nchunk_size = 50\nverbose = true\n",
    )
    .unwrap();
    let cli = parse(&[
        "-c",
        "5",
        "--strict",
        "--chunk-size",
        "70",
        "--verbose=false",
        "in.xlsx",
    ]);
    let opts = layer_opts(&cli, Some(&file)).unwrap();
    assert_eq!(opts.batch.code_column, 5);
    assert!(opts.batch.strict);
    assert_eq!(opts.batch.chunk_size.get(), 70);
    assert!(!opts.verbose);
}

#[test]
fn test_layer_rejects_module_size_from_file() {
    let file = parse_qrbulk_toml("[settings]\nmodule_size = 500\n").unwrap();
    let err = layer_opts(&parse(&["in.xlsx"]), Some(&file)).unwrap_err();
    assert!(err.to_string().contains("module size"), "{err}");
    let opts = layer_opts(&parse(&["--module-size", "20", "in.xlsx"]), Some(&file)).unwrap();
    assert_eq!(opts.batch.style.module_px, 20);
}

#[test]
fn test_output_path_defaults_per_mode() {
    let opts = layer_opts(&parse(&["in.xlsx"]), None).unwrap();
    assert_eq!(output_path(&opts, Mode::Normal), Path::new("qr_codes.zip"));
    assert_eq!(output_path(&opts, Mode::Large), Path::new("bases.zip"));
    let opts = layer_opts(&parse(&["-o", "x/out.zip", "in.xlsx"]), None).unwrap();
    assert_eq!(output_path(&opts, Mode::Large), Path::new("x/out.zip"));
}

// --- write_archive ---

fn small_archive(name: &str) -> qrbulk::Archive {
    let mut b = ArchiveBuilder::new();
    b.add_bytes(name, b"payload").unwrap();
    b.finish().unwrap()
}

fn zip_names(bytes: Vec<u8>) -> Vec<String> {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

#[test]
fn test_write_archive_leaves_only_dest() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.zip");
    let written = write_archive(small_archive("a.txt"), &dest).unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("out.zip")]);

    let bytes = std::fs::read(&dest).unwrap();
    assert_eq!(bytes.len() as u64, written);
    assert_eq!(zip_names(bytes), vec!["a.txt"]);
}

#[test]
fn test_write_archive_replaces_existing_dest() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.zip");
    std::fs::write(&dest, b"old").unwrap();
    write_archive(small_archive("b.txt"), &dest).unwrap();

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    assert_eq!(zip_names(std::fs::read(&dest).unwrap()), vec!["b.txt"]);
}
