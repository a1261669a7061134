use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value};

use crate::core::rounding::{round_money, sum_money};
use crate::core::*;

use super::types::*;
use super::words::amount_in_words;

/// Compute an invoice draft and lay it out as a portal submission.
///
/// Fails with [`EarsivError::Validation`] when the receiver has no tax id,
/// the draft has no line items, or a line quantity or amount exceeds
/// [`MAX_LINE_AMOUNT`]. Other item numbers are read permissively; run
/// [`validate_invoice`] first to reject malformed lines.
#[tracing::instrument(skip_all, fields(items = draft.items.len(), requested = draft.invoice_type.code()))]
pub fn build_payload(draft: &InvoiceDraft, table: &TaxCodeTable) -> Result<Payload, EarsivError> {
    check_structure(draft)?;

    let mut calc = InvoiceCalculator::with_table(table.clone());
    for raw in &draft.items {
        calc.add_item(raw);
    }
    let totals = calc.calculate_totals();
    let items = calc.items();

    let invoice_type = if totals.reverse_charge_total > Decimal::ZERO {
        InvoiceType::ReverseCharge
    } else {
        draft.invoice_type
    };
    tracing::debug!(
        invoice_type = invoice_type.code(),
        payable = %totals.payable_amount,
        "payload type resolved"
    );

    let receiver = &draft.receiver;
    let (buyer_title, buyer_first_name, buyer_last_name) = if receiver.is_company() {
        (receiver.title.clone().unwrap_or_default(), String::new(), String::new())
    } else if receiver.is_person() {
        (
            String::new(),
            receiver.first_name.clone().unwrap_or_default(),
            receiver.last_name.clone().unwrap_or_default(),
        )
    } else {
        (String::new(), String::new(), String::new())
    };

    let tax_type = (invoice_type == InvoiceType::ReverseCharge)
        .then(|| items.iter().find_map(|i| i.reverse_charge_code.clone()))
        .flatten();

    let reverse_charge =
        (invoice_type == InvoiceType::ReverseCharge).then(|| reverse_charge_summary(items, &totals));

    let refund_table = match (&draft.return_reference, draft.invoice_type) {
        (Some(r), InvoiceType::Return) => vec![RefundEntry {
            invoice_number: r.invoice_number.clone(),
            date: r.issue_date.format("%d/%m/%Y").to_string(),
        }],
        _ => Vec::new(),
    };
    // A return keeps its type even when a reverse charge applies.
    let invoice_type = if refund_table.is_empty() {
        invoice_type
    } else {
        InvoiceType::Return
    };

    let (waybill_number, waybill_date) = match &draft.waybill {
        Some(w) if !w.number.trim().is_empty() => (
            Some(w.number.clone()),
            w.date.map(|d| d.format("%d/%m/%Y").to_string()),
        ),
        _ => (None, None),
    };

    let mut notes: Vec<String> = draft
        .notes
        .iter()
        .filter(|n| !n.trim().is_empty())
        .cloned()
        .collect();
    notes.push(amount_in_words(totals.payable_amount));

    Ok(Payload {
        uuid: draft.uuid.clone(),
        date: draft.issued_at.format("%d/%m/%Y").to_string(),
        time: draft.issued_at.format("%H:%M:%S").to_string(),
        invoice_type,
        which_type: WHICH_TYPE.to_string(),
        currency: CURRENCY.to_string(),
        tax_or_identity_number: receiver.tax_id.trim().to_string(),
        buyer_title,
        buyer_first_name,
        buyer_last_name,
        tax_office: receiver.tax_office.clone().unwrap_or_default(),
        country: COUNTRY.to_string(),
        city: receiver.city.clone().unwrap_or_default(),
        district: receiver.district.clone().unwrap_or_default(),
        address: receiver.address.clone().unwrap_or_default(),
        products: items.iter().map(product).collect(),
        tax_type,
        base: totals.submission_base,
        products_total_price: totals.gross_total,
        total_discount_or_increment: totals.discount_total,
        calculated_vat: totals.vat_total,
        total_taxes: totals.taxes_total,
        included_taxes_total_price: totals.tax_inclusive_total,
        payment_price: totals.payable_amount,
        taxes: calc.group_taxes().into_iter().map(TaxTotal::from).collect(),
        refund_table,
        waybill_number,
        waybill_date,
        reverse_charge,
        note: notes.join("\n"),
    })
}

fn check_structure(draft: &InvoiceDraft) -> Result<(), EarsivError> {
    let mut errors = Vec::new();
    if draft.receiver.tax_id.trim().is_empty() {
        errors.push(ValidationError::new(
            "receiver.tax_id",
            "receiver VKN/TCKN is required",
        ));
    }
    if draft.items.is_empty() {
        errors.push(ValidationError::new(
            "items",
            "invoice must have at least one line item",
        ));
    }
    for (i, item) in draft.items.iter().enumerate() {
        errors.extend(validate_item_bounds(item, i));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(EarsivError::Validation(errors))
    }
}

fn product(item: &ComputedLineItem) -> Product {
    let reverse_charge_code = item.reverse_charge_code.clone().unwrap_or_default();
    let exemption_code = if item.vat_rate.is_zero() {
        item.exemption_code.clone().unwrap_or_default()
    } else {
        String::new()
    };

    Product {
        name: item.name.clone(),
        quantity: item.quantity,
        unit_price: item.unit_price,
        price: item.gross_price,
        total_amount: item.net_base,
        unit_type: item.unit_code.clone(),
        vat_rate: item.vat_rate,
        vat_amount: item.vat_amount,
        tax_rate: item.reverse_charge_rate,
        vat_amount_of_tax: money_text(item.reverse_charge_amount),
        tax_code: reverse_charge_code.clone(),
        reverse_charge_code,
        exemption_code,
        discount_or_increment: item.discount_type.label().to_string(),
        discount_or_increment_rate: item.discount_rate,
        discount_or_increment_amount: item.discount_amount,
        discount_or_increment_reason: String::new(),
        tax_fields: tax_fields(&item.computed_taxes),
    }
}

/// `V{code}Orani`, `V{code}Tutari` and, for taxes bearing KDV, `V{code}KdvTutari`.
pub(crate) fn tax_fields(taxes: &[ComputedTax]) -> Map<String, Value> {
    let mut fields = Map::new();
    for tax in taxes {
        fields.insert(format!("V{}Orani", tax.code), number(tax.rate));
        fields.insert(
            format!("V{}Tutari", tax.code),
            Value::String(money_text(tax.amount)),
        );
        if tax.vat_contribution > Decimal::ZERO {
            fields.insert(
                format!("V{}KdvTutari", tax.code),
                Value::String(money_text(tax.vat_contribution)),
            );
        }
    }
    fields
}

fn reverse_charge_summary(items: &[ComputedLineItem], totals: &InvoiceTotals) -> ReverseChargeSummary {
    let charged = || items.iter().filter(|i| i.reverse_charge_rate > Decimal::ZERO);
    ReverseChargeSummary {
        reverse_charge_total: totals.reverse_charge_total,
        subject_base: round_money(sum_money(charged().map(|i| i.net_base))),
        subject_vat: round_money(sum_money(charged().map(|i| i.vat_amount))),
    }
}

fn money_text(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

fn number(value: Decimal) -> Value {
    value
        .to_f64()
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tax(code: &str, rate: Decimal, amount: Decimal, vat: Decimal) -> ComputedTax {
        ComputedTax {
            code: code.into(),
            rate,
            amount,
            vat_contribution: vat,
            is_stoppage: false,
            is_withholding: false,
        }
    }

    #[test]
    fn tax_fields_are_keyed_by_code() {
        let fields = tax_fields(&[
            tax("0003", dec!(20), dec!(40), dec!(0)),
            tax("0071", dec!(10), dec!(10), dec!(2)),
        ]);
        assert_eq!(fields["V0003Orani"], Value::from(20.0));
        assert_eq!(fields["V0003Tutari"], Value::from("40.00"));
        assert!(!fields.contains_key("V0003KdvTutari"));
        assert_eq!(fields["V0071KdvTutari"], Value::from("2.00"));
    }

    #[test]
    fn money_text_has_two_decimals() {
        assert_eq!(money_text(dec!(16.2)), "16.20");
        assert_eq!(money_text(dec!(0)), "0.00");
    }
}
