// src/pricing.rs

use serde::{Deserialize, Serialize};

use crate::tariff::RateTable;

/// Carrier-specific volumetric coefficient: height·width·depth (cm) times
/// this, divided by 10000, yields the notional weight in kg.
pub const VOLUMETRIC_COEFFICIENT: f64 = 3.5;

const GRAMS_PER_KG: f64 = 1000.0;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum DimUnit {
    Cm,
    M,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    G,
}

/// Package dimensions and weight, normalized to cm/kg.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Default)]
pub struct ShipmentSpec {
    pub height_cm: f64,
    pub width_cm: f64,
    pub depth_cm: f64,
    pub weight_kg: f64,
}

impl ShipmentSpec {
    /// Build a spec from values in whatever units the caller collected,
    /// normalizing to cm/kg.
    pub fn from_units(
        height: f64,
        width: f64,
        depth: f64,
        weight: f64,
        dim_unit: DimUnit,
        weight_unit: WeightUnit,
    ) -> Self {
        let dim_factor = match dim_unit {
            DimUnit::Cm => 1.0,
            DimUnit::M => 100.0,
        };
        let weight_factor = match weight_unit {
            WeightUnit::Kg => 1.0,
            WeightUnit::G => 1.0 / 1000.0,
        };
        Self {
            height_cm: height * dim_factor,
            width_cm: width * dim_factor,
            depth_cm: depth * dim_factor,
            weight_kg: weight * weight_factor,
        }
    }
}

/// How the base price was determined.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum QuoteMethod {
    /// No price could be determined; `error` says why.
    NoMatch,
    /// The chargeable weight fell inside a tariffed band.
    StandardRange,
    /// The per-kg excess formula applied above the tariffed ceiling.
    Excess,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum QuoteError {
    /// The zip key is not in the rate table.
    NotFound,
    /// The chargeable weight matched no band and does not exceed the ceiling.
    OutOfRange,
}

/// Result of one pricing computation. Rebuilt wholesale on every call,
/// never mutated in place.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Quote {
    pub volumetric_weight_kg: f64,
    pub chargeable_weight_kg: f64,
    pub base_price: f64,
    pub method: QuoteMethod,
    pub error: Option<QuoteError>,
}

/// Notional weight from dimensions, charging for bulky-but-light packages.
pub fn volumetric_weight_kg(height_cm: f64, width_cm: f64, depth_cm: f64) -> f64 {
    height_cm * width_cm * depth_cm * VOLUMETRIC_COEFFICIENT / 10000.0
}

/// Price a shipment against the rate table. Pure: same inputs, same quote.
///
/// The chargeable weight is the greater of actual and volumetric weight.
/// Band matching is first-hit in the stored (encounter) order, not by
/// magnitude; above the last band's max the per-kg excess formula applies.
pub fn quote(zip: &str, spec: &ShipmentSpec, table: &RateTable) -> Quote {
    let volumetric = volumetric_weight_kg(spec.height_cm, spec.width_cm, spec.depth_cm);
    let chargeable_kg = spec.weight_kg.max(volumetric);
    let chargeable_grams = chargeable_kg * GRAMS_PER_KG;

    let mut result = Quote {
        volumetric_weight_kg: volumetric,
        chargeable_weight_kg: chargeable_kg,
        base_price: 0.0,
        method: QuoteMethod::NoMatch,
        error: None,
    };

    let Some(entry) = table.get(zip) else {
        result.error = Some(QuoteError::NotFound);
        return result;
    };

    let matched = entry
        .ranges
        .iter()
        .find(|r| chargeable_grams >= r.min_grams && chargeable_grams <= r.max_grams);

    if let Some(band) = matched {
        result.base_price = band.price;
        result.method = QuoteMethod::StandardRange;
        return result;
    }

    match entry.last_range() {
        Some(last) if chargeable_grams > last.max_grams => {
            let excess_kg = chargeable_kg - last.max_grams / GRAMS_PER_KG;
            result.base_price = entry.base_excess_price + excess_kg * entry.excess_price_per_kg;
            result.method = QuoteMethod::Excess;
        }
        _ => result.error = Some(QuoteError::OutOfRange),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tariff::{RateEntry, RateTable, WeightRange};

    fn spec_kg(weight_kg: f64) -> ShipmentSpec {
        ShipmentSpec {
            weight_kg,
            ..ShipmentSpec::default()
        }
    }

    fn table_with(zip: &str, entry: RateEntry) -> RateTable {
        let mut table = RateTable::default();
        table.entries.insert(zip.to_string(), entry);
        table
    }

    fn band(min: f64, max: f64, price: f64) -> WeightRange {
        WeightRange {
            min_grams: min,
            max_grams: max,
            price,
        }
    }

    #[test]
    fn volumetric_formula() {
        assert_eq!(volumetric_weight_kg(100.0, 100.0, 100.0), 350.0);
        assert_eq!(volumetric_weight_kg(0.0, 50.0, 50.0), 0.0);
    }

    #[test]
    fn chargeable_weight_is_the_greater_one() {
        let table = table_with(
            "4139",
            RateEntry {
                ranges: vec![band(0.0, 400000.0, 10.0)],
                ..RateEntry::default()
            },
        );

        // heavy but small: actual weight wins
        let q = quote("4139", &spec_kg(300.0), &table);
        assert_eq!(q.chargeable_weight_kg, 300.0);

        // bulky but light: volumetric wins
        let spec = ShipmentSpec {
            height_cm: 100.0,
            width_cm: 100.0,
            depth_cm: 100.0,
            weight_kg: 2.0,
        };
        let q = quote("4139", &spec, &table);
        assert_eq!(q.volumetric_weight_kg, 350.0);
        assert_eq!(q.chargeable_weight_kg, 350.0);
    }

    #[test]
    fn first_band_in_stored_order_wins() {
        let table = table_with(
            "4139",
            RateEntry {
                ranges: vec![band(0.0, 1000.0, 10.0), band(500.0, 1500.0, 20.0)],
                ..RateEntry::default()
            },
        );

        let q = quote("4139", &spec_kg(0.7), &table);
        assert_eq!(q.base_price, 10.0);
        assert_eq!(q.method, QuoteMethod::StandardRange);
        assert_eq!(q.error, None);
    }

    #[test]
    fn excess_formula_above_the_ceiling() {
        let table = table_with(
            "4139",
            RateEntry {
                ranges: vec![band(0.0, 350000.0, 5000.0)],
                excess_price_per_kg: 50.0,
                base_excess_price: 5000.0,
            },
        );

        let q = quote("4139", &spec_kg(360.0), &table);
        assert_eq!(q.method, QuoteMethod::Excess);
        assert_eq!(q.base_price, 5000.0 + 10.0 * 50.0);
    }

    #[test]
    fn unknown_zip_is_not_found() {
        let table = RateTable::default();
        let q = quote("9999", &spec_kg(10.0), &table);
        assert_eq!(q.error, Some(QuoteError::NotFound));
        assert_eq!(q.base_price, 0.0);
        assert_eq!(q.method, QuoteMethod::NoMatch);
    }

    #[test]
    fn gap_below_the_ceiling_is_out_of_range() {
        // bands start at 1 kg, so half a kilogram matches nothing and is
        // not above the ceiling either
        let table = table_with(
            "4139",
            RateEntry {
                ranges: vec![band(1000.0, 2000.0, 10.0)],
                ..RateEntry::default()
            },
        );

        let q = quote("4139", &spec_kg(0.5), &table);
        assert_eq!(q.error, Some(QuoteError::OutOfRange));
        assert_eq!(q.method, QuoteMethod::NoMatch);
        assert_eq!(q.base_price, 0.0);
    }

    #[test]
    fn empty_range_list_is_out_of_range() {
        let table = table_with("4139", RateEntry::default());
        let q = quote("4139", &spec_kg(10.0), &table);
        assert_eq!(q.error, Some(QuoteError::OutOfRange));
    }

    #[test]
    fn quoting_is_idempotent() {
        let table = table_with(
            "4139",
            RateEntry {
                ranges: vec![band(0.0, 75000.0, 46005.44)],
                excess_price_per_kg: 375.02,
                base_excess_price: 46005.44,
            },
        );
        let spec = ShipmentSpec {
            height_cm: 40.0,
            width_cm: 30.0,
            depth_cm: 20.0,
            weight_kg: 12.0,
        };

        assert_eq!(quote("4139", &spec, &table), quote("4139", &spec, &table));
    }

    #[test]
    fn unit_normalization() {
        let spec = ShipmentSpec::from_units(1.0, 0.5, 0.2, 2500.0, DimUnit::M, WeightUnit::G);
        assert_eq!(spec.height_cm, 100.0);
        assert_eq!(spec.width_cm, 50.0);
        assert_eq!(spec.depth_cm, 20.0);
        assert_eq!(spec.weight_kg, 2.5);

        let same = ShipmentSpec::from_units(100.0, 50.0, 20.0, 2.5, DimUnit::Cm, WeightUnit::Kg);
        assert_eq!(spec, same);
    }
}
