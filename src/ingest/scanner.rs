// src/ingest/scanner.rs

use tracing::debug;

use crate::ingest::layout::BlockLayout;
use crate::ingest::numeric::{is_excess_cell, parse_amount, parse_amount_opt};
use crate::tariff::{RateEntry, RateTable, WeightRange};

/// Scan decoded rows for tariff blocks and build the rate table.
///
/// The cursor advances one row at a time until a block-marker row is found,
/// then consumes a fixed `stride` of rows as one block. Stray rows between
/// blocks are tolerated; malformed cells inside a block degrade to 0 via the
/// numeric normalizer. A block without a usable zip key is dropped whole.
/// Scanning itself cannot fail.
pub fn scan_rows(rows: &[Vec<String>], layout: &BlockLayout) -> RateTable {
    let mut table = RateTable::default();

    let mut i = 0;
    while i < rows.len() {
        if !layout.is_block_start(&rows[i]) {
            i += 1;
            continue;
        }

        match read_block(rows, i, layout) {
            Some((zip, entry)) => {
                if table.entries.contains_key(&zip) {
                    debug!(zip = %zip, row = i, "duplicate zip key, replacing earlier entry");
                }
                table.entries.insert(zip, entry);
            }
            None => debug!(row = i, "block without usable zip key, dropped"),
        }
        i += layout.stride;
    }

    debug!(zips = table.len(), "scan complete");
    table
}

/// Read one block starting at the marker row `start`. Returns `None` when
/// the values row carries no zip key.
fn read_block(
    rows: &[Vec<String>],
    start: usize,
    layout: &BlockLayout,
) -> Option<(String, RateEntry)> {
    let values_row = rows.get(start + layout.zip_row_offset)?;
    let zip = values_row.get(layout.zip_col)?.trim();
    if zip.is_empty() {
        return None;
    }

    // Ranges come first, in encounter order. `max > 0` gates out the blank
    // and label rows the stride inevitably covers.
    let mut ranges = Vec::new();
    for offset in layout.range_offsets() {
        let Some(row) = rows.get(start + offset) else {
            continue;
        };
        let min_grams = parse_amount_opt(row.get(layout.min_col).map(String::as_str));
        let max_grams = parse_amount_opt(row.get(layout.max_col).map(String::as_str));
        let price = parse_amount_opt(row.get(layout.price_col).map(String::as_str));
        if max_grams > 0.0 {
            ranges.push(WeightRange {
                min_grams,
                max_grams,
                price,
            });
        }
    }

    // The excess row floats within a small window near the end of the block
    // (and sometimes one row past the stride). First marker hit wins; the
    // flat part of the excess formula is the last accepted range's price.
    let mut excess_price_per_kg = 0.0;
    let mut base_excess_price = 0.0;
    for offset in layout.excess_offsets() {
        let cell = rows
            .get(start + offset)
            .and_then(|row| row.get(layout.excess_col));
        if let Some(cell) = cell {
            if is_excess_cell(cell) {
                excess_price_per_kg = parse_amount(cell);
                base_excess_price = ranges.last().map(|r| r.price).unwrap_or(0.0);
                break;
            }
        }
    }

    Some((
        zip.to_string(),
        RateEntry {
            ranges,
            excess_price_per_kg,
            base_excess_price,
        },
    ))
}
