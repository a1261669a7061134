//! Unit symbol mapping for e-Arşiv line items.
//!
//! Invoice forms use Turkish unit symbols ("ADET", "KG", "GUN" …). The
//! portal expects UN/CEFACT Recommendation 20 codes. Unknown or missing
//! symbols fall back to [`DEFAULT_UNIT_CODE`] (piece).

/// UN/CEFACT code for "one" (piece, adet).
pub const DEFAULT_UNIT_CODE: &str = "C62";

/// Map a form unit symbol to its UN/CEFACT code.
///
/// Matching is case-insensitive. Input that is already a known UN/CEFACT
/// code is passed through.
pub fn unit_code(symbol: Option<&str>) -> &'static str {
    let Some(symbol) = symbol.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_UNIT_CODE;
    };
    let upper = symbol.to_uppercase();

    if let Ok(idx) = UNIT_SYMBOLS.binary_search_by(|(sym, _)| sym.cmp(&upper.as_str())) {
        return UNIT_SYMBOLS[idx].1;
    }
    match UNIT_CODES.binary_search(&upper.as_str()) {
        Ok(idx) => UNIT_CODES[idx],
        Err(_) => DEFAULT_UNIT_CODE,
    }
}

/// Check whether `code` is a UN/CEFACT code the portal accepts.
pub fn is_known_unit_code(code: &str) -> bool {
    UNIT_CODES.binary_search(&code).is_ok()
}

/// Form symbol → UN/CEFACT code. Sorted by symbol for binary search.
static UNIT_SYMBOLS: &[(&str, &str)] = &[
    ("ADET", "C62"),
    ("AY", "MON"),
    ("DAKIKA", "D61"),
    ("GUN", "DAY"),
    ("KG", "KGM"),
    ("LT", "LTR"),
    ("M", "MTR"),
    ("M2", "MTK"),
    ("M3", "MTQ"),
    ("SAAT", "HUR"),
    ("YIL", "ANN"),
];

/// UN/CEFACT codes reachable from the form symbols. Sorted for binary search.
static UNIT_CODES: &[&str] = &[
    "ANN", // Year
    "C62", // One (piece/unit)
    "D61", // Minute
    "DAY", // Day
    "HUR", // Hour
    "KGM", // Kilogram
    "LTR", // Litre
    "MON", // Month
    "MTK", // Square metre
    "MTQ", // Cubic metre
    "MTR", // Metre
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_form_symbols() {
        assert_eq!(unit_code(Some("ADET")), "C62");
        assert_eq!(unit_code(Some("kg")), "KGM");
        assert_eq!(unit_code(Some("Lt")), "LTR");
        assert_eq!(unit_code(Some("M2")), "MTK");
        assert_eq!(unit_code(Some("GUN")), "DAY");
        assert_eq!(unit_code(Some("SAAT")), "HUR");
        assert_eq!(unit_code(Some("DAKIKA")), "D61");
    }

    #[test]
    fn passes_through_known_codes() {
        assert_eq!(unit_code(Some("HUR")), "HUR");
        assert_eq!(unit_code(Some("mtq")), "MTQ");
    }

    #[test]
    fn unknown_or_missing_falls_back_to_piece() {
        assert_eq!(unit_code(None), "C62");
        assert_eq!(unit_code(Some("")), "C62");
        assert_eq!(unit_code(Some("PAKET")), "C62");
    }

    #[test]
    fn known_codes() {
        assert!(is_known_unit_code("C62"));
        assert!(is_known_unit_code("KGM"));
        assert!(!is_known_unit_code("XYZ"));
        assert!(!is_known_unit_code("ADET"));
    }

    #[test]
    fn tables_are_sorted() {
        for window in UNIT_SYMBOLS.windows(2) {
            assert!(
                window[0].0 < window[1].0,
                "unit symbols not sorted: {} >= {}",
                window[0].0,
                window[1].0
            );
        }
        for window in UNIT_CODES.windows(2) {
            assert!(
                window[0] < window[1],
                "unit codes not sorted: {} >= {}",
                window[0],
                window[1]
            );
        }
    }
}
