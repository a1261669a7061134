//! Line item calculation as a chain of pure stages.
//!
//! ```text
//! price → discount → base_vat → secondary_taxes → fold_tax_vat → reverse_charge → finalize
//! ```
//!
//! Each stage consumes the record produced by the one before it, so the
//! order is fixed by the types: the reverse charge can only be computed from
//! a [`VatFolded`] record, i.e. from KDV that already includes the share of
//! every hasVat secondary tax.
//!
//! Intermediate amounts stay unrounded. Secondary tax amounts and their KDV
//! contributions are final when computed and rounded there; every line
//! level amount is rounded once, in [`finalize`].

use rust_decimal::Decimal;

use super::rounding::{percentage, round_money, sum_money};
use super::tax_codes::{TaxCodeTable, normalize_tax_code};
use super::types::*;
use super::units::unit_code;

/// Stage 1: quantity, unit price and gross price.
#[derive(Debug, Clone, PartialEq)]
pub struct Priced {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub gross_price: Decimal,
}

/// Stage 2: resolved discount and net base.
#[derive(Debug, Clone, PartialEq)]
pub struct Discounted {
    pub priced: Priced,
    pub discount_type: DiscountType,
    pub discount_rate: Decimal,
    pub discount_amount: Decimal,
    /// Never negative.
    pub net_base: Decimal,
}

/// Stage 3: KDV on the net base only.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseVat {
    pub discounted: Discounted,
    pub vat_rate: Decimal,
    pub vat_amount: Decimal,
}

/// Stage 4: stopaj and other secondary taxes, in entry order.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxed {
    pub base: BaseVat,
    pub taxes: Vec<ComputedTax>,
}

/// Stage 5: KDV including the contributions of the secondary taxes.
#[derive(Debug, Clone, PartialEq)]
pub struct VatFolded {
    pub base: BaseVat,
    pub taxes: Vec<ComputedTax>,
    pub vat_amount: Decimal,
}

/// Reverse charge honoured on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseCharge {
    /// Tevkifat type code as entered (e.g. "601").
    pub code: Option<String>,
    pub rate: Decimal,
    /// Rounded.
    pub amount: Decimal,
}

/// Stage 6: reverse charge applied and appended to the taxes.
#[derive(Debug, Clone, PartialEq)]
pub struct Charged {
    pub folded: VatFolded,
    pub reverse_charge: Option<ReverseCharge>,
}

/// Quantity defaults to 1 when absent or zero, unit price to 0.
pub fn price(raw: &RawLineItem) -> Priced {
    let quantity = raw
        .quantity
        .filter(|q| !q.is_zero())
        .unwrap_or(Decimal::ONE);
    let unit_price = raw.unit_price.unwrap_or(Decimal::ZERO);

    Priced {
        quantity,
        unit_price,
        gross_price: quantity.saturating_mul(unit_price),
    }
}

/// A non-zero discount rate wins over a given discount amount.
pub fn discount(priced: Priced, raw: &RawLineItem) -> Discounted {
    let discount_rate = raw.discount_rate.unwrap_or(Decimal::ZERO);
    let discount_amount = if discount_rate.is_zero() {
        raw.discount_amount.unwrap_or(Decimal::ZERO)
    } else {
        percentage(priced.gross_price, discount_rate)
    };

    let net_base = match raw.discount_type {
        DiscountType::Decrease => priced.gross_price.saturating_sub(discount_amount),
        DiscountType::Increase => priced.gross_price.saturating_add(discount_amount),
    }
    .max(Decimal::ZERO);

    Discounted {
        priced,
        discount_type: raw.discount_type,
        discount_rate,
        discount_amount,
        net_base,
    }
}

pub fn base_vat(discounted: Discounted, raw: &RawLineItem) -> BaseVat {
    let vat_rate = raw.vat_rate.unwrap_or(Decimal::ZERO);
    let vat_amount = percentage(discounted.net_base, vat_rate);

    BaseVat {
        discounted,
        vat_rate,
        vat_amount,
    }
}

/// Compute every stopaj / other tax. Reverse charges and unknown kinds are skipped.
pub fn secondary_taxes(base: BaseVat, raw_taxes: &[RawTax], table: &TaxCodeTable) -> Taxed {
    let net_base = base.discounted.net_base;
    let quantity = base.discounted.priced.quantity;

    let taxes = raw_taxes
        .iter()
        .filter(|t| matches!(t.kind, TaxKind::Withholding | TaxKind::Other))
        .map(|t| {
            let code = normalize_tax_code(&t.code);
            let rate = t.rate.unwrap_or(Decimal::ZERO);

            let mut amount = if t.is_rate_based && rate > Decimal::ZERO {
                percentage(net_base, rate)
            } else {
                t.amount.unwrap_or(Decimal::ZERO)
            };
            if table.is_per_unit(&code) {
                amount = amount.saturating_mul(quantity);
            }

            let vat_contribution = if table.has_vat(&code) {
                percentage(amount, base.vat_rate)
            } else {
                Decimal::ZERO
            };

            ComputedTax {
                is_stoppage: table.is_stoppage(&code),
                is_withholding: table.is_withholding(&code),
                code,
                rate,
                amount: round_money(amount),
                vat_contribution: round_money(vat_contribution),
            }
        })
        .collect();

    Taxed { base, taxes }
}

pub fn fold_tax_vat(taxed: Taxed) -> VatFolded {
    let contributions = sum_money(taxed.taxes.iter().map(|t| t.vat_contribution));

    VatFolded {
        vat_amount: taxed.base.vat_amount.saturating_add(contributions),
        base: taxed.base,
        taxes: taxed.taxes,
    }
}

/// Apply the first reverse-charge tax with a positive rate, computed from
/// the folded KDV. Further reverse-charge entries are ignored.
pub fn reverse_charge(folded: VatFolded, raw_taxes: &[RawTax], table: &TaxCodeTable) -> Charged {
    let mut entries = raw_taxes
        .iter()
        .filter(|t| t.kind == TaxKind::ReverseCharge);
    let first = entries.next();

    let ignored = entries.count();
    if ignored > 0 {
        tracing::warn!(ignored, "line has more than one reverse-charge tax, using the first");
    }

    let Some(entry) = first else {
        return Charged {
            folded,
            reverse_charge: None,
        };
    };
    let rate = entry.rate.unwrap_or(Decimal::ZERO);
    if rate <= Decimal::ZERO {
        return Charged {
            folded,
            reverse_charge: None,
        };
    }

    let amount = round_money(percentage(folded.vat_amount, rate));
    let code = Some(entry.code.trim().to_string()).filter(|c| !c.is_empty());

    let mut folded = folded;
    folded.taxes.push(ComputedTax {
        code: table.reverse_charge_code.clone(),
        rate,
        amount,
        vat_contribution: Decimal::ZERO,
        is_stoppage: true,
        is_withholding: true,
    });

    Charged {
        folded,
        reverse_charge: Some(ReverseCharge { code, rate, amount }),
    }
}

/// Round the line level amounts and normalize codes.
pub fn finalize(charged: Charged, raw: &RawLineItem) -> ComputedLineItem {
    let Charged {
        folded,
        reverse_charge,
    } = charged;
    let VatFolded {
        base,
        taxes,
        vat_amount,
    } = folded;
    let BaseVat {
        discounted,
        vat_rate,
        ..
    } = base;
    let priced = &discounted.priced;

    let (reverse_charge_code, reverse_charge_rate, reverse_charge_amount) = match reverse_charge {
        Some(rc) => (rc.code, rc.rate, rc.amount),
        None => (None, Decimal::ZERO, Decimal::ZERO),
    };

    ComputedLineItem {
        name: raw.name.clone(),
        quantity: priced.quantity,
        unit_price: round_money(priced.unit_price),
        unit_code: unit_code(raw.unit.as_deref()).to_string(),
        gross_price: round_money(priced.gross_price),
        discount_type: discounted.discount_type,
        discount_rate: discounted.discount_rate,
        discount_amount: round_money(discounted.discount_amount),
        net_base: round_money(discounted.net_base),
        vat_rate,
        vat_amount: round_money(vat_amount),
        reverse_charge_code,
        reverse_charge_rate,
        reverse_charge_amount,
        exemption_code: raw
            .exemption_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from),
        computed_taxes: taxes,
    }
}

/// Run every stage for one raw line.
pub fn compute_line(raw: &RawLineItem, table: &TaxCodeTable) -> ComputedLineItem {
    let priced = price(raw);
    let discounted = discount(priced, raw);
    let base = base_vat(discounted, raw);
    let taxed = secondary_taxes(base, &raw.taxes, table);
    let folded = fold_tax_vat(taxed);
    let charged = reverse_charge(folded, &raw.taxes, table);
    finalize(charged, raw)
}
