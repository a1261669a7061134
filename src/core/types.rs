use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

/// Raw invoice line as entered on the invoice form.
///
/// Numeric fields are optional and permissive: absent or malformed values
/// deserialize to `None` and the calculator substitutes its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLineItem {
    /// Item or service name (mal/hizmet).
    pub name: String,
    /// Quantity (miktar). Defaults to 1 when absent, malformed or zero.
    #[serde(deserialize_with = "lenient::decimal")]
    pub quantity: Option<Decimal>,
    /// Unit price (birim fiyat). Defaults to 0.
    #[serde(alias = "price", deserialize_with = "lenient::decimal")]
    pub unit_price: Option<Decimal>,
    /// Unit symbol as entered (e.g. "ADET", "KG"), mapped to a UN/CEFACT code.
    pub unit: Option<String>,
    /// Discount percentage. Takes precedence over `discount_amount` when non-zero.
    #[serde(deserialize_with = "lenient::decimal")]
    pub discount_rate: Option<Decimal>,
    /// Absolute discount, used only when no discount rate is given.
    #[serde(deserialize_with = "lenient::decimal")]
    pub discount_amount: Option<Decimal>,
    /// Whether the discount reduces (iskonto) or increases (arttırım) the price.
    pub discount_type: DiscountType,
    /// KDV percentage. Defaults to 0.
    #[serde(alias = "kdvRate", deserialize_with = "lenient::decimal")]
    pub vat_rate: Option<Decimal>,
    /// Manually attached taxes, in entry order.
    pub taxes: Vec<RawTax>,
    /// KDV exemption reason code, relevant for 0% lines.
    pub exemption_code: Option<String>,
}

/// Manually attached tax on a raw line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTax {
    #[serde(rename = "type")]
    pub kind: TaxKind,
    /// Tax code; numeric codes are zero-padded to 4 digits on use.
    #[serde(deserialize_with = "lenient::code")]
    pub code: String,
    /// Percentage of the net base.
    #[serde(deserialize_with = "lenient::decimal")]
    pub rate: Option<Decimal>,
    /// Fixed amount, used when the tax is not rate based or has no rate.
    #[serde(deserialize_with = "lenient::decimal")]
    pub amount: Option<Decimal>,
    #[serde(alias = "isRate", deserialize_with = "lenient::flag")]
    pub is_rate_based: bool,
}

impl Default for RawTax {
    fn default() -> Self {
        Self {
            kind: TaxKind::Unknown,
            code: String::new(),
            rate: None,
            amount: None,
            is_rate_based: true,
        }
    }
}

/// Category of a manually attached tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TaxKind {
    /// Stopaj: computed on the net base.
    #[serde(rename = "STOPAJ")]
    Withholding,
    /// Any other secondary tax (ÖTV, damga, ÖİV …).
    #[serde(rename = "OTHER")]
    Other,
    /// KDV tevkifatı: computed on the line's final KDV.
    #[serde(rename = "TEVKIFAT")]
    ReverseCharge,
    /// Unrecognised kind; ignored by the calculator.
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl TaxKind {
    /// Parse a form label. Anything unrecognised is [`TaxKind::Unknown`].
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "STOPAJ" | "Withholding" | "withholding" => Self::Withholding,
            "OTHER" | "Other" | "other" => Self::Other,
            "TEVKIFAT" | "ReverseCharge" | "reverse_charge" => Self::ReverseCharge,
            _ => Self::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for TaxKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.map_or(Self::Unknown, |l| Self::from_label(&l)))
    }
}

/// Direction of a line discount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum DiscountType {
    /// İskonto: subtracted from the gross price.
    #[default]
    #[serde(rename = "İskonto")]
    Decrease,
    /// Arttırım: added to the gross price.
    #[serde(rename = "Arttırım")]
    Increase,
}

impl DiscountType {
    /// Label used on the GİB portal.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Decrease => "İskonto",
            Self::Increase => "Arttırım",
        }
    }

    /// Parse a form label. Unrecognised labels fall back to [`DiscountType::Decrease`].
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Arttırım" | "Arttirim" | "ARTTIRIM" | "Increase" | "increase" => Self::Increase,
            _ => Self::Decrease,
        }
    }
}

impl<'de> Deserialize<'de> for DiscountType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.map_or(Self::Decrease, |l| Self::from_label(&l)))
    }
}

/// A secondary tax computed for one line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedTax {
    /// 4-digit tax code.
    pub code: String,
    /// Percentage applied (0 for fixed-amount taxes without a rate).
    pub rate: Decimal,
    /// Tax amount, 2 dp.
    pub amount: Decimal,
    /// KDV carried by this tax and folded into the line KDV, 2 dp.
    pub vat_contribution: Decimal,
    /// Excluded from the taxes total and deducted from the payable amount.
    pub is_stoppage: bool,
    /// Deducted from the payable amount.
    pub is_withholding: bool,
}

/// A fully priced invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedLineItem {
    pub name: String,
    pub quantity: Decimal,
    /// Unit price, 2 dp.
    pub unit_price: Decimal,
    /// UN/CEFACT unit code (e.g. "C62").
    pub unit_code: String,
    /// quantity × unit price (fiyat), 2 dp.
    pub gross_price: Decimal,
    pub discount_type: DiscountType,
    pub discount_rate: Decimal,
    /// Resolved discount amount (iskonto tutarı), 2 dp.
    pub discount_amount: Decimal,
    /// Net base (matrah / mal hizmet tutarı), 2 dp, never negative.
    pub net_base: Decimal,
    pub vat_rate: Decimal,
    /// KDV including the contributions of hasVat secondary taxes, 2 dp.
    pub vat_amount: Decimal,
    /// Tevkifat type code (e.g. "601"), if a reverse charge applies.
    pub reverse_charge_code: Option<String>,
    pub reverse_charge_rate: Decimal,
    /// Tevkifat amount, 2 dp.
    pub reverse_charge_amount: Decimal,
    pub exemption_code: Option<String>,
    /// Secondary taxes in entry order, reverse charge last.
    pub computed_taxes: Vec<ComputedTax>,
}

/// Invoice-level totals.
///
/// Every field is the 2 dp rounded sum of the already rounded per-line
/// fields; nothing is re-derived from unrounded intermediates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    /// Σ gross price (mal hizmet toplam tutarı).
    pub gross_total: Decimal,
    /// Σ net base (matrah), as computed.
    pub net_base: Decimal,
    /// Net base reported to the portal: 0.01 when the invoice has lines
    /// and the computed base is not positive.
    pub submission_base: Decimal,
    /// Σ line KDV (hesaplanan KDV).
    pub vat_total: Decimal,
    /// |Σ decreases − Σ increases|.
    pub discount_total: Decimal,
    /// Σ tevkifat.
    pub reverse_charge_total: Decimal,
    /// Σ secondary taxes that are not stoppage.
    pub non_stoppage_tax_total: Decimal,
    /// Σ secondary taxes that are stoppage or withholding.
    pub stoppage_withholding_total: Decimal,
    /// KDV + non-stoppage taxes (vergiler toplamı).
    pub taxes_total: Decimal,
    /// Base + taxes total (vergiler dahil toplam tutar).
    pub tax_inclusive_total: Decimal,
    /// Tax inclusive total − stoppage/withholding (ödenecek tutar).
    pub payable_amount: Decimal,
}

/// Per-code tax summary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedTax {
    #[serde(rename = "taxCode")]
    pub code: String,
    #[serde(rename = "totalTaxAmount")]
    pub total_amount: Decimal,
}

/// GİB e-Arşiv invoice type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceType {
    /// SATIS: regular sale.
    #[default]
    #[serde(rename = "SATIS")]
    Sale,
    /// IADE: return of a previous invoice.
    #[serde(rename = "IADE")]
    Return,
    /// TEVKIFAT: at least one line carries a reverse charge.
    #[serde(rename = "TEVKIFAT")]
    ReverseCharge,
    /// ISTISNA: KDV exempt.
    #[serde(rename = "ISTISNA")]
    Exempt,
    /// OZELMATRAH: special base.
    #[serde(rename = "OZELMATRAH")]
    SpecialBase,
}

impl InvoiceType {
    /// Portal type code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sale => "SATIS",
            Self::Return => "IADE",
            Self::ReverseCharge => "TEVKIFAT",
            Self::Exempt => "ISTISNA",
            Self::SpecialBase => "OZELMATRAH",
        }
    }

    /// Parse from a portal type code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SATIS" => Some(Self::Sale),
            "IADE" => Some(Self::Return),
            "TEVKIFAT" => Some(Self::ReverseCharge),
            "ISTISNA" => Some(Self::Exempt),
            "OZELMATRAH" => Some(Self::SpecialBase),
            _ => None,
        }
    }
}

/// Invoice receiver (alıcı).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receiver {
    /// VKN (10 digits, companies) or TCKN (11 digits, individuals).
    #[serde(alias = "vknTckn")]
    pub tax_id: String,
    /// Company title, used with a VKN.
    pub title: Option<String>,
    /// First name, used with a TCKN.
    pub first_name: Option<String>,
    /// Last name, used with a TCKN.
    pub last_name: Option<String>,
    pub tax_office: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
}

impl Receiver {
    /// True for a 10-digit VKN (legal entity).
    pub fn is_company(&self) -> bool {
        self.tax_id.trim().len() == 10
    }

    /// True for an 11-digit TCKN (natural person).
    pub fn is_person(&self) -> bool {
        self.tax_id.trim().len() == 11
    }
}

/// Reference to the invoice being returned by an IADE invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnReference {
    pub invoice_number: String,
    pub issue_date: NaiveDate,
}

/// Delivery note (irsaliye) attached to the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waybill {
    pub number: String,
    pub date: Option<NaiveDate>,
}

/// Invoice as assembled by the caller, before calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    /// Issue date and time.
    pub issued_at: NaiveDateTime,
    /// Caller-supplied ETTN, passed through untouched.
    pub uuid: Option<String>,
    /// Requested type; overridden to TEVKIFAT when a reverse charge applies.
    pub invoice_type: InvoiceType,
    pub receiver: Receiver,
    pub items: Vec<RawLineItem>,
    pub notes: Vec<String>,
    pub return_reference: Option<ReturnReference>,
    pub waybill: Option<Waybill>,
}
