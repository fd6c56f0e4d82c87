//! qrbulk CLI: one QR code per spreadsheet row, or split oversized sheets.

use anyhow::Result;
use clap::Parser;
use qrbulk::engine::arg_parser::Cli;
use qrbulk::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
