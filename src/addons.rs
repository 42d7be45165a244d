// src/addons.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum AddonKind {
    /// Contributes its literal value.
    Fixed,
    /// Contributes `base · value / 100`.
    Percent,
}

/// One surcharge or tax line item. The list itself is owned by the caller.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct AddonItem {
    pub id: u32,
    pub name: String,
    pub value: f64,
    pub kind: AddonKind,
}

/// Sum the contributions of `items` against `base`.
///
/// Every percent item references the same `base`; contributions never
/// accumulate into each other's base.
pub fn aggregate(items: &[AddonItem], base: f64) -> f64 {
    items
        .iter()
        .map(|item| match item.kind {
            AddonKind::Fixed => item.value,
            AddonKind::Percent => base * item.value / 100.0,
        })
        .sum()
}

/// Fully composed cost: surcharges are applied to the base price, taxes to
/// the surcharged subtotal.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct CostBreakdown {
    pub base_price: f64,
    pub surcharge_total: f64,
    pub subtotal: f64,
    pub tax_total: f64,
    pub total: f64,
}

impl CostBreakdown {
    pub fn compute(base_price: f64, surcharges: &[AddonItem], taxes: &[AddonItem]) -> Self {
        let surcharge_total = aggregate(surcharges, base_price);
        let subtotal = base_price + surcharge_total;
        let tax_total = aggregate(taxes, subtotal);
        Self {
            base_price,
            surcharge_total,
            subtotal,
            tax_total,
            total: subtotal + tax_total,
        }
    }
}
