// src/tariff.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One tariffed weight band. Bounds are in grams, as the carrier export
/// states them; `price` covers the whole band.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct WeightRange {
    pub min_grams: f64,
    pub max_grams: f64,
    pub price: f64,
}

/// Everything the export declares for a single destination zip key.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct RateEntry {
    /// Weight bands in the order the block listed them. Matching is
    /// first-hit in this order, so the list is deliberately not sorted.
    pub ranges: Vec<WeightRange>,
    /// Per-kilogram price applied above the highest tariffed band.
    pub excess_price_per_kg: f64,
    /// Flat component of the excess formula: the price of the last band
    /// the block declared (0 when the block had none).
    pub base_excess_price: f64,
}

impl RateEntry {
    /// The last band by list position, which the export treats as the
    /// tariffed ceiling.
    pub fn last_range(&self) -> Option<&WeightRange> {
        self.ranges.last()
    }
}

/// Normalized rate table for one ingested export. Built once per successful
/// ingestion and replaced wholesale by the next one; quoting never mutates it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct RateTable {
    /// One entry per zip key. A later block with the same key fully
    /// replaces the earlier entry.
    pub entries: BTreeMap<String, RateEntry>,
}

impl RateTable {
    pub fn get(&self, zip: &str) -> Option<&RateEntry> {
        self.entries.get(zip)
    }

    /// All known zip keys, lexicographically sorted (map order).
    pub fn zip_codes(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
