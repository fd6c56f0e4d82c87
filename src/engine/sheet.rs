//! Spreadsheet I/O: read the uploaded workbook with calamine, write chunk workbooks with rust_xlsxwriter.

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use rust_xlsxwriter::Workbook;
use std::path::Path;

use crate::utils::config::OutputNames;
use crate::{Cell, Chunk, Dataset, Row};

/// Spreadsheet value -> [`Cell`]. Dates keep their serial number.
fn cell_from_data(d: &Data) -> Cell {
    match d {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(x) => Cell::Float(*x),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

/// Header name for column `idx` (0-based). Blank headers get a placeholder name.
fn header_name(d: &Data, idx: usize) -> String {
    let name = cell_from_data(d).to_string();
    let name = name.trim();
    if name.is_empty() {
        format!("Unnamed: {idx}")
    } else {
        name.to_string()
    }
}

/// Load the first sheet of the workbook at `path`. The first used row is the header.
///
/// Column positions are counted from column A: when the used range starts further right, the
/// leading columns are kept as unnamed empty columns.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("open spreadsheet {}", path.display()))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(r) => r.with_context(|| format!("read first sheet of {}", path.display()))?,
        None => bail!("{} contains no worksheet", path.display()),
    };
    let lead = range.start().map(|(_, c)| c as usize).unwrap_or(0);

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        bail!("{}: sheet is empty (no header row)", path.display());
    };
    let columns: Vec<String> = (0..lead)
        .map(|i| format!("Unnamed: {i}"))
        .chain(
            header
                .iter()
                .enumerate()
                .map(|(i, d)| header_name(d, lead + i)),
        )
        .collect();
    let data: Vec<Row> = rows
        .map(|r| {
            std::iter::repeat_n(Cell::Empty, lead)
                .chain(r.iter().map(cell_from_data))
                .collect()
        })
        .collect();

    log::debug!(
        "Loaded {}: {} columns, {} rows",
        path.display(),
        columns.len(),
        data.len()
    );
    Ok(Dataset::new(columns, data))
}

/// Serialize a header plus rows as an XLSX workbook (single sheet) in memory.
pub fn rows_to_xlsx(columns: &[String], rows: &[Row]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(OutputNames::CHUNK_SHEET)?;

    for (c, name) in columns.iter().enumerate() {
        sheet.write_string(0, col_num(c)?, name)?;
    }
    for (r, row) in rows.iter().enumerate() {
        let r = u32::try_from(r + 1).context("row index exceeds sheet limits")?;
        for (c, cell) in row.iter().enumerate() {
            let c = col_num(c)?;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    sheet.write_string(r, c, s)?;
                }
                Cell::Int(i) => {
                    sheet.write_number(r, c, *i as f64)?;
                }
                Cell::Float(x) if x.is_finite() => {
                    sheet.write_number(r, c, *x)?;
                }
                Cell::Float(x) => {
                    sheet.write_string(r, c, x.to_string())?;
                }
                Cell::Bool(b) => {
                    sheet.write_boolean(r, c, *b)?;
                }
            }
        }
    }
    workbook
        .save_to_buffer()
        .context("serialize workbook to buffer")
}

/// Serialize one chunk (header row + its rows).
pub fn chunk_to_xlsx(chunk: &Chunk<'_>) -> Result<Vec<u8>> {
    rows_to_xlsx(chunk.columns, chunk.rows)
        .with_context(|| format!("export chunk {}", chunk.number))
}

fn col_num(c: usize) -> Result<u16> {
    u16::try_from(c).context("column index exceeds sheet limits")
}
