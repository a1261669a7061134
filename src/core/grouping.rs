use rust_decimal::Decimal;

use super::rounding::round_money;
use super::types::*;

/// Sum computed tax amounts per code across all lines.
///
/// Codes appear in order of first occurrence. Codes whose sum is not
/// positive are omitted.
pub fn group_taxes(items: &[ComputedLineItem]) -> Vec<GroupedTax> {
    let mut groups: Vec<(&str, Decimal)> = Vec::new();

    for tax in items.iter().flat_map(|i| i.computed_taxes.iter()) {
        match groups.iter_mut().find(|(code, _)| *code == tax.code) {
            Some((_, total)) => *total = total.saturating_add(tax.amount),
            None => groups.push((tax.code.as_str(), tax.amount)),
        }
    }

    groups
        .into_iter()
        .filter(|(_, total)| *total > Decimal::ZERO)
        .map(|(code, total)| GroupedTax {
            code: code.to_string(),
            total_amount: round_money(total),
        })
        .collect()
}
