//! GİB e-Arşiv submission payload.
//!
//! Turns an [`InvoiceDraft`](crate::core::InvoiceDraft) into the document the
//! portal client submits: header fields, per-line products with the
//! per-tax-code `V{code}Orani` / `V{code}Tutari` / `V{code}KdvTutari` fields,
//! the grouped tax array, and the reverse-charge summaries. No I/O happens
//! here; sending the payload is the portal client's job.
//!
//! # Example
//!
//! ```
//! use earsiv::core::*;
//! use earsiv::payload::build_payload;
//! use rust_decimal_macros::dec;
//! use chrono::NaiveDate;
//!
//! let issued_at = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let draft = InvoiceDraftBuilder::new(issued_at)
//!     .receiver(ReceiverBuilder::new("1234567890").title("ACME A.Ş.").build())
//!     .add_item(LineItemBuilder::new("Temizlik hizmeti", dec!(1), dec!(1000))
//!         .vat_rate(dec!(20))
//!         .reverse_charge("613", dec!(90))
//!         .build())
//!     .build()
//!     .unwrap();
//!
//! let payload = build_payload(&draft, &TaxCodeTable::default()).unwrap();
//! assert_eq!(payload.invoice_type, InvoiceType::ReverseCharge);
//! assert_eq!(payload.payment_price, dec!(1020.00));
//! ```

mod builder;
mod types;
mod words;

pub use builder::build_payload;
pub use types::*;
pub use words::amount_in_words;
