//! Core tax engine: data model, tax code classification, the staged
//! line item pipeline, totals aggregation and tax grouping.
//!
//! Everything in this module is pure computation. Nothing here performs
//! I/O, and an [`InvoiceCalculator`] holds no state beyond its own items.

mod builder;
mod calculator;
mod error;
mod grouping;
mod lenient;
pub mod pipeline;
pub(crate) mod rounding;
mod tax_codes;
mod totals;
mod types;
pub mod units;
mod validation;

pub use builder::*;
pub use calculator::*;
pub use error::*;
pub use grouping::*;
pub use tax_codes::*;
pub use totals::*;
pub use types::*;
pub use units::{is_known_unit_code, unit_code};
pub use validation::*;
