//! Column resolution and record extraction for one cycle.

use anyhow::{Result, bail};

use crate::{Dataset, Record};

/// The two columns a generation run reads, as 0-based indices plus their header names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub code: usize,
    pub label: usize,
    pub code_name: String,
    pub label_name: String,
}

/// Resolve a 1-based column position against the dataset's header.
pub fn resolve_column(dataset: &Dataset, position: usize) -> Result<usize> {
    let count = dataset.columns.len();
    if position == 0 || position > count {
        bail!(
            "column position {} is out of range: the sheet has {} column{} (positions start at 1)",
            position,
            count,
            if count == 1 { "" } else { "s" }
        );
    }
    Ok(position - 1)
}

/// Resolve both positions. Either one out of range fails the whole batch.
pub fn resolve_columns(
    dataset: &Dataset,
    code_position: usize,
    label_position: usize,
) -> Result<ResolvedColumns> {
    let code = resolve_column(dataset, code_position)?;
    let label = resolve_column(dataset, label_position)?;
    Ok(ResolvedColumns {
        code,
        label,
        code_name: dataset.columns[code].clone(),
        label_name: dataset.columns[label].clone(),
    })
}

/// One record per row, in row order. Codes are trimmed text; blank codes become `None`.
pub fn records<'a>(
    dataset: &'a Dataset,
    cols: &'a ResolvedColumns,
) -> impl ExactSizeIterator<Item = Record> + 'a {
    (0..dataset.len()).map(move |row| Record {
        row,
        code: dataset
            .cell(row, cols.code)
            .trimmed_text()
            .filter(|c| !c.is_empty()),
        label: dataset.cell(row, cols.label).to_string(),
    })
}
