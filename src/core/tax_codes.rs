//! Tax code classification tables.
//!
//! A code can be *stoppage* (left out of the visible taxes total and
//! deducted from the payable amount), *withholding* (deducted from the
//! payable amount), and/or *hasVat* (the tax itself bears KDV, which is
//! folded back into the line KDV). Unknown codes are none of these.
//!
//! The tables are plain configuration: [`TaxCodeTable::default`] carries the
//! GİB e-Arşiv sets, and other variants can be deserialized and handed to
//! [`InvoiceCalculator::with_table`](super::InvoiceCalculator::with_table).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Width of a normalized tax code.
pub const TAX_CODE_WIDTH: usize = 4;

/// GİB stoppage codes: KDV tevkifatı, GV stopajı, KV stopajı, mera fonu.
pub const GIB_STOPPAGE_CODES: &[&str] = &["0003", "0011", "9015", "9040"];

/// GİB withholding codes: KDV tevkifatı, ÖTV 1. liste tevkifatı.
pub const GIB_WITHHOLDING_CODES: &[&str] = &["4171", "9015"];

/// GİB codes whose amount itself bears KDV (ÖTV lists, ÖİV, …).
pub const GIB_HAS_VAT_CODES: &[&str] = &[
    "0061", "0071", "0073", "0074", "0075", "0076", "0077", "4071", "4171", "8001", "8002", "8004",
    "8005", "9077",
];

/// Codes charged per unit: the computed amount is multiplied by quantity.
pub const GIB_PER_UNIT_CODES: &[&str] = &["4171"];

/// Code under which a line's reverse charge (tevkifat) is reported.
pub const GIB_REVERSE_CHARGE_CODE: &str = "9015";

/// Immutable classification tables, injected into the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCodeTable {
    pub stoppage: BTreeSet<String>,
    pub withholding: BTreeSet<String>,
    pub has_vat: BTreeSet<String>,
    #[serde(default)]
    pub per_unit: BTreeSet<String>,
    /// Stoppage code attached to computed reverse-charge taxes.
    pub reverse_charge_code: String,
}

impl Default for TaxCodeTable {
    fn default() -> Self {
        Self::gib()
    }
}

impl TaxCodeTable {
    /// The GİB e-Arşiv tables.
    pub fn gib() -> Self {
        Self {
            stoppage: to_set(GIB_STOPPAGE_CODES),
            withholding: to_set(GIB_WITHHOLDING_CODES),
            has_vat: to_set(GIB_HAS_VAT_CODES),
            per_unit: to_set(GIB_PER_UNIT_CODES),
            reverse_charge_code: GIB_REVERSE_CHARGE_CODE.to_string(),
        }
    }

    pub fn is_stoppage(&self, code: &str) -> bool {
        self.stoppage.contains(code)
    }

    pub fn is_withholding(&self, code: &str) -> bool {
        self.withholding.contains(code)
    }

    pub fn has_vat(&self, code: &str) -> bool {
        self.has_vat.contains(code)
    }

    /// Whether the amount of `code` is charged per unit of quantity.
    pub fn is_per_unit(&self, code: &str) -> bool {
        self.per_unit.contains(code)
    }
}

fn to_set(codes: &[&str]) -> BTreeSet<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

/// Normalize a tax code: trim and left-pad numeric codes with zeros to
/// [`TAX_CODE_WIDTH`] digits. Non-numeric codes are returned trimmed.
pub fn normalize_tax_code(code: &str) -> String {
    let code = code.trim();
    if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) {
        format!("{code:0>width$}", width = TAX_CODE_WIDTH)
    } else {
        code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gib_classification() {
        let t = TaxCodeTable::default();

        assert!(t.is_stoppage("9015"));
        assert!(t.is_withholding("9015"));
        assert!(!t.has_vat("9015"));

        assert!(t.is_stoppage("0003"));
        assert!(!t.is_withholding("0003"));

        assert!(!t.is_stoppage("4171"));
        assert!(t.is_withholding("4171"));
        assert!(t.has_vat("4171"));
        assert!(t.is_per_unit("4171"));

        assert!(t.has_vat("0071"));
        assert!(!t.is_stoppage("0071"));
    }

    #[test]
    fn unknown_codes_classify_false() {
        let t = TaxCodeTable::default();
        for code in ["1047", "4080", "", "XYZ"] {
            assert!(!t.is_stoppage(code));
            assert!(!t.is_withholding(code));
            assert!(!t.has_vat(code));
        }
    }

    #[test]
    fn normalizes_codes() {
        assert_eq!(normalize_tax_code("3"), "0003");
        assert_eq!(normalize_tax_code(" 71 "), "0071");
        assert_eq!(normalize_tax_code("9015"), "9015");
        assert_eq!(normalize_tax_code("12345"), "12345");
        assert_eq!(normalize_tax_code("AB"), "AB");
        assert_eq!(normalize_tax_code(""), "");
    }

    #[test]
    fn custom_table_is_isolated_from_default() {
        let mut t = TaxCodeTable::default();
        t.stoppage.insert("1047".into());
        assert!(t.is_stoppage("1047"));
        assert!(!TaxCodeTable::default().is_stoppage("1047"));
    }
}
