// src/ingest/layout.rs

use serde::{Deserialize, Serialize};

/// Declarative description of one tariff-block layout: where a block starts,
/// how many rows it spans, and which columns carry which values.
///
/// The export declares no schema of its own, so these offsets are the
/// contract. Keeping them as a value decouples the layout from the scan loop
/// and lets a revised export ship as a new `BlockLayout` instead of new scan
/// code.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct BlockLayout {
    /// Literal the first cell of a block's header row contains.
    pub block_marker: String,
    /// Fixed number of rows per block; the cursor jumps by this after a
    /// header row, so blocks never overlap.
    pub stride: usize,
    /// Row offset (from the header row) of the values row holding the zip key.
    pub zip_row_offset: usize,
    /// Column of the zip key within the values row.
    pub zip_col: usize,
    /// Columns of a weight range's min / max (grams) and price.
    pub min_col: usize,
    pub max_col: usize,
    pub price_col: usize,
    /// Row offsets (from the header row, inclusive) that may carry ranges.
    pub first_range_offset: usize,
    pub last_range_offset: usize,
    /// Row offsets (inclusive) searched for the per-kg excess row. This
    /// window overlaps `last_range_offset`; see the scanner for how the
    /// overlap resolves.
    pub excess_search_start: usize,
    pub excess_search_end: usize,
    /// Column whose text marks and prices the excess row.
    pub excess_col: usize,
}

impl BlockLayout {
    /// Layout of the Andreani tariff export as it ships today.
    pub fn andreani() -> Self {
        Self {
            block_marker: "Unidad Operativa origen".to_string(),
            stride: 14,
            zip_row_offset: 1,
            zip_col: 6,
            min_col: 8,
            max_col: 9,
            price_col: 10,
            first_range_offset: 1,
            last_range_offset: 13,
            excess_search_start: 12,
            excess_search_end: 15,
            excess_col: 10,
        }
    }

    /// Whether `row` opens a new tariff block.
    pub fn is_block_start(&self, row: &[String]) -> bool {
        row.first()
            .map(|cell| cell.contains(&self.block_marker))
            .unwrap_or(false)
    }

    pub fn range_offsets(&self) -> impl Iterator<Item = usize> {
        self.first_range_offset..=self.last_range_offset
    }

    pub fn excess_offsets(&self) -> impl Iterator<Item = usize> {
        self.excess_search_start..=self.excess_search_end
    }
}

impl Default for BlockLayout {
    fn default() -> Self {
        Self::andreani()
    }
}
