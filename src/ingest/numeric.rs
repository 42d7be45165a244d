// src/ingest/numeric.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker word the export puts on the per-kg excess row ("Excedente 375.02").
pub const EXCESS_MARKER: &str = "excedente";

/// Everything that is not part of an amount: currency symbols, whitespace,
/// and marker words like "Excedente" all fall out here.
static NON_AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.,]").unwrap());

/// True when the cell carries the excess marker word, case-insensitively.
pub fn is_excess_cell(raw: &str) -> bool {
    raw.to_lowercase().contains(EXCESS_MARKER)
}

/// Coerce a locale-ambiguous amount token to `f64`.
///
/// The export mixes formats like `"1.250,50"`, `"131.258.80"`,
/// `"$ 1.200,50"` and `"Excedente 375.02"` within one file, so the
/// separators are disambiguated by punctuation count:
///
/// - dots AND commas → dots are thousands separators, the comma is the
///   decimal point (`1.250,50` → `1250.50`)
/// - multiple dots, no comma → all dots but the last are thousands
///   separators (`131.258.80` → `131258.80`)
/// - only commas → the first comma becomes the decimal point; tokens with
///   several commas stay ambiguous and are not second-guessed
/// - exactly one dot → already a plain decimal
///
/// Anything unparsable degrades to `0.0`, never an error.
pub fn parse_amount(raw: &str) -> f64 {
    let mut cleaned = NON_AMOUNT.replace_all(raw.trim(), "").into_owned();
    if cleaned.is_empty() {
        return 0.0;
    }

    let dots = cleaned.matches('.').count();
    let commas = cleaned.matches(',').count();

    if dots > 0 && commas > 0 {
        cleaned.retain(|c| c != '.');
        cleaned = cleaned.replacen(',', ".", 1);
    } else if dots > 1 {
        // keep only the last dot as the decimal point
        if let Some(idx) = cleaned.rfind('.') {
            let decimal_part = cleaned[idx + 1..].to_string();
            let integer_part: String =
                cleaned[..idx].chars().filter(|c| *c != '.').collect();
            cleaned = format!("{}.{}", integer_part, decimal_part);
        }
    } else if commas > 0 {
        cleaned = cleaned.replacen(',', ".", 1);
    }

    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Missing cells behave like empty ones.
pub fn parse_amount_opt(raw: Option<&str>) -> f64 {
    raw.map(parse_amount).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argentine_thousands_and_decimal() {
        assert_eq!(parse_amount("1.250,50"), 1250.50);
        assert_eq!(parse_amount("$ 1.200,50"), 1200.50);
    }

    #[test]
    fn multiple_dots_keep_last_as_decimal() {
        assert_eq!(parse_amount("131.258.80"), 131258.80);
        assert_eq!(parse_amount("46.005.44"), 46005.44);
    }

    #[test]
    fn comma_only_is_decimal() {
        assert_eq!(parse_amount("375,02"), 375.02);
    }

    #[test]
    fn plain_numbers_pass_through() {
        assert_eq!(parse_amount("75000"), 75000.0);
        assert_eq!(parse_amount("0.5"), 0.5);
    }

    #[test]
    fn excess_marker_is_stripped() {
        assert_eq!(parse_amount("Excedente 375.02"), 375.02);
        assert!(is_excess_cell("Excedente 375.02"));
        assert!(is_excess_cell("EXCEDENTE x kg"));
        assert!(!is_excess_cell("350001"));
    }

    #[test]
    fn garbage_degrades_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("n/a"), 0.0);
        assert_eq!(parse_amount_opt(None), 0.0);
        assert_eq!(parse_amount_opt(Some("$ 12")), 12.0);
    }
}
