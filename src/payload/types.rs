use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::{EarsivError, GroupedTax, InvoiceType};

/// Portal "hangi tip" marker for e-Arşiv invoices.
pub const WHICH_TYPE: &str = "5000/30000";
/// Turkish lira.
pub const CURRENCY: &str = "TRY";
pub const COUNTRY: &str = "Türkiye";

/// Submission document for one invoice.
///
/// Monetary fields serialize as JSON numbers. Field names follow the portal
/// client's camelCase keys; Turkish keys are kept where the portal uses them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    /// ETTN, when the caller supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// `dd/mm/yyyy`.
    pub date: String,
    /// `HH:MM:SS`.
    pub time: String,
    pub invoice_type: InvoiceType,
    pub which_type: String,
    pub currency: String,
    pub tax_or_identity_number: String,
    pub buyer_title: String,
    pub buyer_first_name: String,
    pub buyer_last_name: String,
    pub tax_office: String,
    pub country: String,
    #[serde(rename = "sehir")]
    pub city: String,
    #[serde(rename = "ilce")]
    pub district: String,
    #[serde(rename = "bulvarcaddesokak")]
    pub address: String,
    pub products: Vec<Product>,
    /// Reverse-charge type code of the first line that carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,
    /// Net base after the zero-base guard.
    #[serde(with = "rust_decimal::serde::float")]
    pub base: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub products_total_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_discount_or_increment: Decimal,
    #[serde(rename = "calculatedVAT", with = "rust_decimal::serde::float")]
    pub calculated_vat: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_taxes: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub included_taxes_total_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub payment_price: Decimal,
    pub taxes: Vec<TaxTotal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub refund_table: Vec<RefundEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waybill_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waybill_date: Option<String>,
    #[serde(flatten)]
    pub reverse_charge: Option<ReverseChargeSummary>,
    /// Caller notes followed by the payable amount in words, one per line.
    #[serde(rename = "not")]
    pub note: String,
}

impl Payload {
    /// Serialize to the JSON document handed to the portal client.
    pub fn to_json(&self) -> Result<String, EarsivError> {
        serde_json::to_string(self).map_err(|e| EarsivError::Payload(e.to_string()))
    }

    /// Serialize to a JSON value, e.g. for merging with client-specific fields.
    pub fn to_value(&self) -> Result<Value, EarsivError> {
        serde_json::to_value(self).map_err(|e| EarsivError::Payload(e.to_string()))
    }
}

/// One invoice line as submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Gross price (quantity × unit price).
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Net base of the line.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub unit_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub vat_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub vat_amount: Decimal,
    /// Reverse-charge rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    /// Reverse-charge amount, 2 dp text.
    pub vat_amount_of_tax: String,
    #[serde(rename = "tevkifatKodu")]
    pub reverse_charge_code: String,
    #[serde(rename = "vergiKodu")]
    pub tax_code: String,
    #[serde(rename = "istisnaKodu")]
    pub exemption_code: String,
    pub discount_or_increment: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_or_increment_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_or_increment_amount: Decimal,
    pub discount_or_increment_reason: String,
    /// Per-tax-code `V{code}Orani`, `V{code}Tutari`, `V{code}KdvTutari` fields.
    #[serde(flatten)]
    pub tax_fields: Map<String, Value>,
}

/// Entry of the per-code tax array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxTotal {
    pub tax_code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax_amount: Decimal,
}

impl From<GroupedTax> for TaxTotal {
    fn from(g: GroupedTax) -> Self {
        Self {
            tax_code: g.code,
            total_tax_amount: g.total_amount,
        }
    }
}

/// Returned invoice reference of an IADE invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundEntry {
    pub invoice_number: String,
    /// `dd/mm/yyyy`.
    pub date: String,
}

/// Reverse-charge totals reported on TEVKIFAT invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReverseChargeSummary {
    /// Σ tevkifat.
    #[serde(rename = "tevkifatKdvTutari", with = "rust_decimal::serde::float")]
    pub reverse_charge_total: Decimal,
    /// Σ net base of lines carrying a reverse charge.
    #[serde(rename = "tevkifataTabiIslemTutari", with = "rust_decimal::serde::float")]
    pub subject_base: Decimal,
    /// Σ KDV of lines carrying a reverse charge.
    #[serde(
        rename = "tevkifataTabiIslemUzerindenHesaplananKdv",
        with = "rust_decimal::serde::float"
    )]
    pub subject_vat: Decimal,
}
