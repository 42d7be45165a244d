// src/ingest/mod.rs

pub mod layout;
pub mod numeric;
pub mod scanner;

pub use layout::BlockLayout;
pub use scanner::scan_rows;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{
    fs::File,
    io::{BufReader, Cursor, Read},
    path::Path,
};
use tracing::debug;

use crate::tariff::RateTable;

/// How much of the file head the delimiter sniff inspects.
const SNIFF_BYTES: usize = 4096;

/// The carrier export is `;`-delimited, but copies re-saved through
/// spreadsheet tools frequently come back `,`-delimited. Whichever separator
/// dominates the file head wins; ties fall to `,`.
fn sniff_delimiter(head: &[u8]) -> u8 {
    let semicolons = head.iter().filter(|b| **b == b';').count();
    let commas = head.iter().filter(|b| **b == b',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Decode the raw tariff export into rows of text cells.
///
/// Rows keep their relative order and may have differing cell counts; the
/// scanner works on offsets, so nothing is dropped or padded here. Any
/// decoder error is a structural failure and aborts the whole ingestion.
pub fn read_rows<R: Read>(mut reader: R) -> Result<Vec<Vec<String>>> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .context("reading tariff source")?;

    let delimiter = sniff_delimiter(&data[..data.len().min(SNIFF_BYTES)]);
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // records with different field-counts are expected
        .delimiter(delimiter)
        .from_reader(Cursor::new(data));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("tariff decode error at record {}", idx))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    debug!(
        rows = rows.len(),
        delimiter = %char::from(delimiter),
        "decoded tariff source"
    );
    Ok(rows)
}

/// Decode a tariff export file from disk.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open tariff file: {:?}", path.as_ref()))?;
    read_rows(BufReader::new(file))
}

/// Decode + scan in one step: file path in, rate table out.
pub fn load_rate_table<P: AsRef<Path>>(path: P, layout: &BlockLayout) -> Result<RateTable> {
    let rows = load_rows(path)?;
    Ok(scan_rows(&rows, layout))
}
