use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use super::error::EarsivError;
use super::types::*;
use super::validation;

/// Builder for invoice drafts.
///
/// ```
/// use earsiv::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let issued_at = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap().and_hms_opt(14, 30, 0).unwrap();
/// let draft = InvoiceDraftBuilder::new(issued_at)
///     .receiver(ReceiverBuilder::new("1234567890").title("ACME A.Ş.").city("İstanbul").build())
///     .add_item(LineItemBuilder::new("Yazılım geliştirme", dec!(10), dec!(1500))
///         .unit("SAAT")
///         .vat_rate(dec!(20))
///         .build())
///     .build()
///     .unwrap();
/// assert_eq!(draft.items.len(), 1);
/// ```
pub struct InvoiceDraftBuilder {
    issued_at: NaiveDateTime,
    uuid: Option<String>,
    invoice_type: InvoiceType,
    receiver: Option<Receiver>,
    items: Vec<RawLineItem>,
    notes: Vec<String>,
    return_reference: Option<ReturnReference>,
    waybill: Option<Waybill>,
}

impl InvoiceDraftBuilder {
    pub fn new(issued_at: NaiveDateTime) -> Self {
        Self {
            issued_at,
            uuid: None,
            invoice_type: InvoiceType::Sale,
            receiver: None,
            items: Vec::new(),
            notes: Vec::new(),
            return_reference: None,
            waybill: None,
        }
    }

    /// ETTN issued elsewhere; passed through to the payload.
    pub fn uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    pub fn invoice_type(mut self, invoice_type: InvoiceType) -> Self {
        self.invoice_type = invoice_type;
        self
    }

    pub fn receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn add_item(mut self, item: RawLineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Mark the draft as a return (IADE) of an earlier invoice.
    pub fn returning(mut self, invoice_number: impl Into<String>, issue_date: NaiveDate) -> Self {
        self.invoice_type = InvoiceType::Return;
        self.return_reference = Some(ReturnReference {
            invoice_number: invoice_number.into(),
            issue_date,
        });
        self
    }

    pub fn waybill(mut self, number: impl Into<String>, date: Option<NaiveDate>) -> Self {
        self.waybill = Some(Waybill {
            number: number.into(),
            date,
        });
        self
    }

    /// Build the draft and run strict validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<InvoiceDraft, EarsivError> {
        let draft = self.build_unchecked()?;

        let errors = validation::validate_invoice(&draft);
        if !errors.is_empty() {
            return Err(EarsivError::Validation(errors));
        }

        Ok(draft)
    }

    /// Build without validation. On this permissive path numbers the
    /// calculator cannot read fall back to defaults.
    pub fn build_unchecked(self) -> Result<InvoiceDraft, EarsivError> {
        let receiver = self
            .receiver
            .ok_or_else(|| EarsivError::Builder("receiver is required".into()))?;

        if self.items.len() > 10_000 {
            return Err(EarsivError::Builder(
                "invoice cannot have more than 10,000 line items".into(),
            ));
        }

        Ok(InvoiceDraft {
            issued_at: self.issued_at,
            uuid: self.uuid,
            invoice_type: self.invoice_type,
            receiver,
            items: self.items,
            notes: self.notes,
            return_reference: self.return_reference,
            waybill: self.waybill,
        })
    }
}

/// Builder for the invoice receiver.
pub struct ReceiverBuilder {
    tax_id: String,
    title: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    tax_office: Option<String>,
    address: Option<String>,
    district: Option<String>,
    city: Option<String>,
}

impl ReceiverBuilder {
    /// `tax_id` is a 10-digit VKN or an 11-digit TCKN.
    pub fn new(tax_id: impl Into<String>) -> Self {
        Self {
            tax_id: tax_id.into(),
            title: None,
            first_name: None,
            last_name: None,
            tax_office: None,
            address: None,
            district: None,
            city: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn tax_office(mut self, tax_office: impl Into<String>) -> Self {
        self.tax_office = Some(tax_office.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn build(self) -> Receiver {
        Receiver {
            tax_id: self.tax_id,
            title: self.title,
            first_name: self.first_name,
            last_name: self.last_name,
            tax_office: self.tax_office,
            address: self.address,
            district: self.district,
            city: self.city,
        }
    }
}

/// Builder for raw line items.
pub struct LineItemBuilder {
    name: String,
    quantity: Decimal,
    unit_price: Decimal,
    unit: Option<String>,
    discount_rate: Option<Decimal>,
    discount_amount: Option<Decimal>,
    discount_type: DiscountType,
    vat_rate: Option<Decimal>,
    taxes: Vec<RawTax>,
    exemption_code: Option<String>,
}

impl LineItemBuilder {
    pub fn new(name: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
            unit: None,
            discount_rate: None,
            discount_amount: None,
            discount_type: DiscountType::Decrease,
            vat_rate: None,
            taxes: Vec::new(),
            exemption_code: None,
        }
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = Some(rate);
        self
    }

    pub fn discount_rate(mut self, rate: Decimal) -> Self {
        self.discount_rate = Some(rate);
        self
    }

    pub fn discount_amount(mut self, amount: Decimal) -> Self {
        self.discount_amount = Some(amount);
        self
    }

    /// Turn the discount into a surcharge (arttırım).
    pub fn increase(mut self) -> Self {
        self.discount_type = DiscountType::Increase;
        self
    }

    pub fn exemption_code(mut self, code: impl Into<String>) -> Self {
        self.exemption_code = Some(code.into());
        self
    }

    pub fn add_tax(mut self, tax: RawTax) -> Self {
        self.taxes.push(tax);
        self
    }

    /// Rate-based stopaj.
    pub fn withholding(self, code: impl Into<String>, rate: Decimal) -> Self {
        self.add_tax(RawTax {
            kind: TaxKind::Withholding,
            code: code.into(),
            rate: Some(rate),
            ..Default::default()
        })
    }

    /// Rate-based secondary tax.
    pub fn other_tax(self, code: impl Into<String>, rate: Decimal) -> Self {
        self.add_tax(RawTax {
            kind: TaxKind::Other,
            code: code.into(),
            rate: Some(rate),
            ..Default::default()
        })
    }

    /// Fixed-amount secondary tax.
    pub fn other_tax_amount(self, code: impl Into<String>, amount: Decimal) -> Self {
        self.add_tax(RawTax {
            kind: TaxKind::Other,
            code: code.into(),
            amount: Some(amount),
            is_rate_based: false,
            ..Default::default()
        })
    }

    /// KDV tevkifatı with its type code (e.g. "601") and percentage.
    pub fn reverse_charge(self, code: impl Into<String>, rate: Decimal) -> Self {
        self.add_tax(RawTax {
            kind: TaxKind::ReverseCharge,
            code: code.into(),
            rate: Some(rate),
            ..Default::default()
        })
    }

    pub fn build(self) -> RawLineItem {
        RawLineItem {
            name: self.name,
            quantity: Some(self.quantity),
            unit_price: Some(self.unit_price),
            unit: self.unit,
            discount_rate: self.discount_rate,
            discount_amount: self.discount_amount,
            discount_type: self.discount_type,
            vat_rate: self.vat_rate,
            taxes: self.taxes,
            exemption_code: self.exemption_code,
        }
    }
}
