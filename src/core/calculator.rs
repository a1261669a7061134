use super::error::EarsivError;
use super::grouping;
use super::pipeline;
use super::tax_codes::TaxCodeTable;
use super::totals;
use super::types::*;
use super::validation;

/// Accumulates computed line items for one invoice.
///
/// Add every line first, then read totals and grouped taxes. Both reads are
/// recomputed from the stored lines on every call, so they are idempotent and
/// stay correct if more lines are added in between. Use one calculator per
/// invoice; it shares no state with other instances.
///
/// ```
/// use earsiv::core::*;
/// use rust_decimal_macros::dec;
///
/// let mut calc = InvoiceCalculator::new();
/// calc.add_item(
///     &LineItemBuilder::new("Kira", dec!(1), dec!(1000))
///         .vat_rate(dec!(20))
///         .withholding("0003", dec!(20))
///         .build(),
/// );
///
/// let totals = calc.calculate_totals();
/// assert_eq!(totals.taxes_total, dec!(200.00));
/// assert_eq!(totals.payable_amount, dec!(1000.00));
/// assert_eq!(calc.group_taxes()[0].code, "0003");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvoiceCalculator {
    table: TaxCodeTable,
    items: Vec<ComputedLineItem>,
}

impl InvoiceCalculator {
    /// Calculator using the GİB tax code tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculator using custom tax code tables.
    pub fn with_table(table: TaxCodeTable) -> Self {
        Self {
            table,
            items: Vec::new(),
        }
    }

    pub fn table(&self) -> &TaxCodeTable {
        &self.table
    }

    /// Compute one raw line and append it. Malformed or missing numbers fall
    /// back to their defaults.
    pub fn add_item(&mut self, raw: &RawLineItem) -> &ComputedLineItem {
        let item = pipeline::compute_line(raw, &self.table);
        tracing::debug!(
            name = %item.name,
            net_base = %item.net_base,
            vat_amount = %item.vat_amount,
            reverse_charge = %item.reverse_charge_amount,
            taxes = item.computed_taxes.len(),
            "line item computed"
        );
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Validate the raw line first and add it only if it is well formed.
    /// Nothing is appended on error.
    pub fn add_item_strict(&mut self, raw: &RawLineItem) -> Result<&ComputedLineItem, EarsivError> {
        let errors = validation::validate_item(raw, self.items.len());
        if !errors.is_empty() {
            return Err(EarsivError::Validation(errors));
        }
        Ok(self.add_item(raw))
    }

    /// Computed lines in insertion order.
    pub fn items(&self) -> &[ComputedLineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Invoice totals over all lines added so far.
    pub fn calculate_totals(&self) -> InvoiceTotals {
        let totals = totals::calculate_totals(&self.items);
        tracing::debug!(
            items = self.items.len(),
            net_base = %totals.net_base,
            vat_total = %totals.vat_total,
            payable = %totals.payable_amount,
            "invoice totals computed"
        );
        totals
    }

    /// Tax amounts grouped by code over all lines added so far.
    pub fn group_taxes(&self) -> Vec<GroupedTax> {
        grouping::group_taxes(&self.items)
    }
}

impl Extend<RawLineItem> for InvoiceCalculator {
    fn extend<I: IntoIterator<Item = RawLineItem>>(&mut self, iter: I) {
        for raw in iter {
            self.add_item(&raw);
        }
    }
}
