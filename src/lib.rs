//! # earsiv
//!
//! Tax computation engine for Turkish e-Arşiv invoices: turns raw line items
//! (quantity, unit price, discount, KDV rate and manually entered extra taxes)
//! into fully priced lines, invoice totals and a per-code tax summary ready
//! for submission to the GİB portal.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Every finalized amount is rounded half-up to 2 decimal places exactly once.
//!
//! ## Quick Start
//!
//! ```rust
//! use earsiv::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut calc = InvoiceCalculator::new();
//! calc.add_item(
//!     &LineItemBuilder::new("Danışmanlık", dec!(1), dec!(100))
//!         .discount_rate(dec!(10))
//!         .vat_rate(dec!(18))
//!         .build(),
//! );
//!
//! let totals = calc.calculate_totals();
//! assert_eq!(totals.net_base, dec!(90.00));
//! assert_eq!(totals.vat_total, dec!(16.20));
//! assert_eq!(totals.payable_amount, dec!(106.20));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Line item pipeline, totals, tax grouping, strict validation |
//! | `payload` | GİB e-Arşiv submission payload builder |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "payload")]
pub mod payload;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
