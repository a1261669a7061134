use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::types::*;

/// Largest quantity or amount accepted on a line. Keeps every product and
/// sum of up to 10,000 lines within `Decimal` range.
pub const MAX_LINE_AMOUNT: Decimal = dec!(1000000000000);

/// Strictly validate a raw line item.
/// Returns all validation errors found (not just the first).
///
/// The permissive calculator would silently default everything reported
/// here; this is the opt-in path for callers that want to reject bad input.
pub fn validate_item(item: &RawLineItem, index: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let prefix = format!("items[{index}]");

    match item.quantity {
        None => errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            "quantity is required",
        )),
        Some(q) if q <= Decimal::ZERO => errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            "quantity must be greater than zero",
        )),
        Some(q) if q > MAX_LINE_AMOUNT => errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            format!("quantity must not exceed {MAX_LINE_AMOUNT}"),
        )),
        Some(_) => {}
    }

    match item.unit_price {
        None => errors.push(ValidationError::new(
            format!("{prefix}.unit_price"),
            "unit price is required",
        )),
        Some(p) => check_amount(p, &format!("{prefix}.unit_price"), &mut errors),
    }

    if let Some(rate) = item.discount_rate {
        check_percentage(rate, &format!("{prefix}.discount_rate"), &mut errors);
    }
    if let Some(amount) = item.discount_amount {
        check_amount(amount, &format!("{prefix}.discount_amount"), &mut errors);
    }
    if let Some(rate) = item.vat_rate {
        check_percentage(rate, &format!("{prefix}.vat_rate"), &mut errors);
    }

    for (i, tax) in item.taxes.iter().enumerate() {
        validate_tax(tax, &format!("{prefix}.taxes[{i}]"), &mut errors);
    }

    errors
}

/// Check only that the line's quantities and amounts lie within
/// ±[`MAX_LINE_AMOUNT`]. Applied by the payload builder, which otherwise
/// reads lines permissively.
pub fn validate_item_bounds(item: &RawLineItem, index: usize) -> Vec<ValidationError> {
    let prefix = format!("items[{index}]");
    let mut errors = Vec::new();

    let mut check = |value: Option<Decimal>, field: String| {
        if let Some(v) = value.filter(|v| v.abs() > MAX_LINE_AMOUNT) {
            errors.push(ValidationError::new(
                field,
                format!("{v} is outside ±{MAX_LINE_AMOUNT}"),
            ));
        }
    };
    check(item.quantity, format!("{prefix}.quantity"));
    check(item.unit_price, format!("{prefix}.unit_price"));
    check(item.discount_amount, format!("{prefix}.discount_amount"));
    for (i, tax) in item.taxes.iter().enumerate() {
        check(tax.amount, format!("{prefix}.taxes[{i}].amount"));
    }

    errors
}

/// Validate an invoice draft before calculation and submission.
/// Returns all validation errors found (not just the first).
pub fn validate_invoice(draft: &InvoiceDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let tax_id = draft.receiver.tax_id.trim();
    if tax_id.is_empty() {
        errors.push(ValidationError::new(
            "receiver.tax_id",
            "receiver VKN/TCKN is required",
        ));
    } else if !tax_id.chars().all(|c| c.is_ascii_digit()) || !matches!(tax_id.len(), 10 | 11) {
        errors.push(ValidationError::new(
            "receiver.tax_id",
            format!("'{tax_id}' is neither a 10-digit VKN nor an 11-digit TCKN"),
        ));
    }

    if draft.items.is_empty() {
        errors.push(ValidationError::new(
            "items",
            "invoice must have at least one line item",
        ));
    }

    for (i, item) in draft.items.iter().enumerate() {
        errors.extend(validate_item(item, i));
    }

    if draft.invoice_type == InvoiceType::Return {
        match &draft.return_reference {
            None => errors.push(ValidationError::new(
                "return_reference",
                "a return (IADE) invoice must reference the returned invoice",
            )),
            Some(r) if r.invoice_number.trim().is_empty() => errors.push(ValidationError::new(
                "return_reference.invoice_number",
                "returned invoice number must not be empty",
            )),
            Some(_) => {}
        }
    }

    errors
}

fn validate_tax(tax: &RawTax, prefix: &str, errors: &mut Vec<ValidationError>) {
    if tax.kind == TaxKind::Unknown {
        errors.push(ValidationError::new(
            format!("{prefix}.type"),
            "tax type must be STOPAJ, OTHER or TEVKIFAT",
        ));
    }

    let code = tax.code.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
        errors.push(ValidationError::new(
            format!("{prefix}.code"),
            "tax code must be numeric",
        ));
    }

    if let Some(rate) = tax.rate {
        check_percentage(rate, &format!("{prefix}.rate"), errors);
    }
    if let Some(amount) = tax.amount {
        check_amount(amount, &format!("{prefix}.amount"), errors);
    }

    match tax.kind {
        TaxKind::ReverseCharge if tax.rate.is_none() => errors.push(ValidationError::new(
            format!("{prefix}.rate"),
            "reverse charge (tevkifat) requires a rate",
        )),
        TaxKind::Withholding | TaxKind::Other
            if tax.rate.is_none() && tax.amount.is_none() =>
        {
            errors.push(ValidationError::new(
                prefix.to_string(),
                "tax requires a rate or an amount",
            ))
        }
        _ => {}
    }
}

fn check_percentage(value: Decimal, field: &str, errors: &mut Vec<ValidationError>) {
    if value < Decimal::ZERO || value > dec!(100) {
        errors.push(ValidationError::new(
            field,
            format!("percentage {value} must be between 0 and 100"),
        ));
    }
}

fn check_amount(value: Decimal, field: &str, errors: &mut Vec<ValidationError>) {
    if value.is_sign_negative() && !value.is_zero() {
        errors.push(ValidationError::new(
            field,
            format!("amount {value} must not be negative"),
        ));
    } else if value > MAX_LINE_AMOUNT {
        errors.push(ValidationError::new(
            field,
            format!("amount {value} must not exceed {MAX_LINE_AMOUNT}"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_item() -> RawLineItem {
        RawLineItem {
            name: "Danışmanlık".into(),
            quantity: Some(dec!(1)),
            unit_price: Some(dec!(100)),
            vat_rate: Some(dec!(20)),
            ..Default::default()
        }
    }

    fn draft(tax_id: &str, items: Vec<RawLineItem>) -> InvoiceDraft {
        InvoiceDraft {
            issued_at: NaiveDate::from_ymd_opt(2024, 6, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            uuid: None,
            invoice_type: InvoiceType::Sale,
            receiver: Receiver {
                tax_id: tax_id.into(),
                ..Default::default()
            },
            items,
            notes: Vec::new(),
            return_reference: None,
            waybill: None,
        }
    }

    #[test]
    fn valid_item_passes() {
        assert!(validate_item(&valid_item(), 0).is_empty());
    }

    #[test]
    fn missing_quantity_and_price() {
        let errors = validate_item(&RawLineItem::default(), 3);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["items[3].quantity", "items[3].unit_price"]);
    }

    #[test]
    fn percentages_out_of_range() {
        let item = RawLineItem {
            vat_rate: Some(dec!(120)),
            discount_rate: Some(dec!(-5)),
            ..valid_item()
        };
        assert_eq!(validate_item(&item, 0).len(), 2);
    }

    #[test]
    fn tax_checks() {
        let item = RawLineItem {
            taxes: vec![
                RawTax {
                    kind: TaxKind::ReverseCharge,
                    code: "601".into(),
                    ..Default::default()
                },
                RawTax {
                    kind: TaxKind::Other,
                    code: "ÖTV".into(),
                    rate: Some(dec!(10)),
                    ..Default::default()
                },
            ],
            ..valid_item()
        };
        let errors = validate_item(&item, 0);
        assert!(errors.iter().any(|e| e.field == "items[0].taxes[0].rate"));
        assert!(errors.iter().any(|e| e.field == "items[0].taxes[1].code"));
    }

    #[test]
    fn oversized_amounts() {
        let item = RawLineItem {
            quantity: Some(dec!(1000000000001)),
            unit_price: Some(dec!(5000000000000)),
            ..valid_item()
        };
        let errors = validate_item(&item, 0);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["items[0].quantity", "items[0].unit_price"]);
    }

    #[test]
    fn bounds_ignore_everything_but_magnitude() {
        let item = RawLineItem {
            quantity: Some(dec!(-5000000000000)),
            unit_price: None,
            vat_rate: Some(dec!(500)),
            taxes: vec![RawTax {
                amount: Some(dec!(2000000000000)),
                ..Default::default()
            }],
            ..valid_item()
        };
        let errors = validate_item_bounds(&item, 1);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["items[1].quantity", "items[1].taxes[0].amount"]);
        assert!(validate_item_bounds(&valid_item(), 0).is_empty());
    }

    #[test]
    fn valid_draft_passes() {
        assert!(validate_invoice(&draft("1234567890", vec![valid_item()])).is_empty());
        assert!(validate_invoice(&draft("12345678901", vec![valid_item()])).is_empty());
    }

    #[test]
    fn draft_requires_receiver_and_items() {
        let errors = validate_invoice(&draft("", vec![]));
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["receiver.tax_id", "items"]);
    }

    #[test]
    fn malformed_tax_id() {
        let errors = validate_invoice(&draft("12345", vec![valid_item()]));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("VKN"));
    }

    #[test]
    fn return_needs_reference() {
        let mut d = draft("1234567890", vec![valid_item()]);
        d.invoice_type = InvoiceType::Return;
        let errors = validate_invoice(&d);
        assert_eq!(errors[0].field, "return_reference");
    }
}
