//! Fixed-size chunking of a dataset into borrowed views.

use std::num::NonZeroUsize;

use crate::{Chunk, Dataset};

/// Split `dataset` into consecutive chunks of `chunk_size` rows, numbered from 1.
/// The last chunk holds the remainder. An empty dataset gives no chunks.
pub fn split(dataset: &Dataset, chunk_size: NonZeroUsize) -> Vec<Chunk<'_>> {
    dataset
        .rows
        .chunks(chunk_size.get())
        .enumerate()
        .map(|(i, rows)| Chunk {
            number: i + 1,
            columns: &dataset.columns,
            rows,
        })
        .collect()
}

/// ceil(rows / chunk_size)
pub fn chunk_count(rows: usize, chunk_size: NonZeroUsize) -> usize {
    rows.div_ceil(chunk_size.get())
}
