use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::rounding::{round_money, sum_money};
use super::types::*;

/// Smallest base and payable amount the portal accepts.
pub const MINIMUM_SUBMISSION_AMOUNT: Decimal = dec!(0.01);

/// Aggregate computed lines into invoice totals.
///
/// Pure and idempotent. Each total is the rounded sum of the already
/// rounded line fields. When there is at least one line and the net base is
/// not positive, the submission base becomes 0.01 and the dependent totals
/// are recomputed from it; the payable amount is then clamped to 0.01.
/// Sums saturate at the `Decimal` bounds.
pub fn calculate_totals(items: &[ComputedLineItem]) -> InvoiceTotals {
    let sum = |f: fn(&ComputedLineItem) -> Decimal| round_money(sum_money(items.iter().map(f)));

    let gross_total = sum(|i| i.gross_price);
    let net_base = sum(|i| i.net_base);
    let vat_total = sum(|i| i.vat_amount);
    let reverse_charge_total = sum(|i| i.reverse_charge_amount);

    let discounts = |kind: DiscountType| {
        sum_money(
            items
                .iter()
                .filter(|i| i.discount_type == kind)
                .map(|i| i.discount_amount),
        )
    };
    let discount_total = round_money(
        discounts(DiscountType::Decrease)
            .saturating_sub(discounts(DiscountType::Increase))
            .abs(),
    );

    let all_taxes = || items.iter().flat_map(|i| i.computed_taxes.iter());
    let non_stoppage_tax_total = round_money(sum_money(
        all_taxes().filter(|t| !t.is_stoppage).map(|t| t.amount),
    ));
    let stoppage_withholding_total = round_money(sum_money(
        all_taxes()
            .filter(|t| t.is_stoppage || t.is_withholding)
            .map(|t| t.amount),
    ));

    let taxes_total = round_money(vat_total.saturating_add(non_stoppage_tax_total));
    let mut submission_base = net_base;
    let mut tax_inclusive_total = round_money(submission_base.saturating_add(taxes_total));
    let mut payable_amount = round_money(tax_inclusive_total.saturating_sub(stoppage_withholding_total));

    if !items.is_empty() {
        if submission_base <= Decimal::ZERO {
            tracing::debug!(%net_base, "net base not positive, submitting minimum base");
            submission_base = MINIMUM_SUBMISSION_AMOUNT;
            tax_inclusive_total = round_money(submission_base.saturating_add(taxes_total));
            payable_amount = round_money(tax_inclusive_total.saturating_sub(stoppage_withholding_total));
        }
        if payable_amount <= Decimal::ZERO {
            tracing::debug!(%payable_amount, "payable amount not positive, clamping");
            payable_amount = MINIMUM_SUBMISSION_AMOUNT;
        }
    }

    InvoiceTotals {
        gross_total,
        net_base,
        submission_base,
        vat_total,
        discount_total,
        reverse_charge_total,
        non_stoppage_tax_total,
        stoppage_withholding_total,
        taxes_total,
        tax_inclusive_total,
        payable_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(net_base: Decimal, vat_amount: Decimal) -> ComputedLineItem {
        ComputedLineItem {
            name: "Test".into(),
            quantity: Decimal::ONE,
            unit_price: net_base,
            unit_code: "C62".into(),
            gross_price: net_base,
            discount_type: DiscountType::Decrease,
            discount_rate: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            net_base,
            vat_rate: dec!(20),
            vat_amount,
            reverse_charge_code: None,
            reverse_charge_rate: Decimal::ZERO,
            reverse_charge_amount: Decimal::ZERO,
            exemption_code: None,
            computed_taxes: Vec::new(),
        }
    }

    fn tax(code: &str, amount: Decimal, is_stoppage: bool, is_withholding: bool) -> ComputedTax {
        ComputedTax {
            code: code.into(),
            rate: Decimal::ZERO,
            amount,
            vat_contribution: Decimal::ZERO,
            is_stoppage,
            is_withholding,
        }
    }

    #[test]
    fn empty_invoice_is_all_zero() {
        let t = calculate_totals(&[]);
        assert_eq!(t.net_base, dec!(0));
        assert_eq!(t.submission_base, dec!(0));
        assert_eq!(t.payable_amount, dec!(0));
    }

    #[test]
    fn sums_line_fields() {
        let t = calculate_totals(&[item(dec!(100), dec!(20)), item(dec!(50.55), dec!(10.11))]);
        assert_eq!(t.gross_total, dec!(150.55));
        assert_eq!(t.net_base, dec!(150.55));
        assert_eq!(t.vat_total, dec!(30.11));
        assert_eq!(t.taxes_total, dec!(30.11));
        assert_eq!(t.tax_inclusive_total, dec!(180.66));
        assert_eq!(t.payable_amount, dec!(180.66));
    }

    #[test]
    fn tax_categories_split_between_total_and_deduction() {
        let mut line = item(dec!(100), dec!(20));
        line.computed_taxes = vec![
            tax("0003", dec!(10), true, false),
            tax("4171", dec!(4), false, true),
            tax("1047", dec!(1), false, false),
        ];
        let t = calculate_totals(&[line]);

        assert_eq!(t.non_stoppage_tax_total, dec!(5));
        assert_eq!(t.stoppage_withholding_total, dec!(14));
        assert_eq!(t.taxes_total, dec!(25));
        assert_eq!(t.tax_inclusive_total, dec!(125));
        assert_eq!(t.payable_amount, dec!(111));
    }

    #[test]
    fn zero_base_is_replaced_for_submission() {
        let t = calculate_totals(&[item(dec!(0), dec!(0))]);
        assert_eq!(t.net_base, dec!(0));
        assert_eq!(t.submission_base, dec!(0.01));
        assert_eq!(t.tax_inclusive_total, dec!(0.01));
        assert_eq!(t.payable_amount, dec!(0.01));
    }

    #[test]
    fn non_positive_payable_is_clamped() {
        let mut line = item(dec!(10), dec!(0));
        line.computed_taxes = vec![tax("0003", dec!(50), true, false)];
        let t = calculate_totals(&[line]);
        assert_eq!(t.tax_inclusive_total, dec!(10));
        assert_eq!(t.payable_amount, dec!(0.01));
    }

    #[test]
    fn discount_total_is_absolute_difference() {
        let mut a = item(dec!(90), dec!(0));
        a.discount_amount = dec!(10);
        let mut b = item(dec!(55), dec!(0));
        b.discount_type = DiscountType::Increase;
        b.discount_amount = dec!(15);
        let t = calculate_totals(&[a, b]);
        assert_eq!(t.discount_total, dec!(5));
    }
}
