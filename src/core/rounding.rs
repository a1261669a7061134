use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Decimal places of every finalized monetary amount.
pub(crate) const MONEY_DP: u32 = 2;

/// Round to 2 decimal places using half-up (commercial rounding).
pub(crate) fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// `value * rate / 100`, unrounded. Saturates at the `Decimal` bounds.
pub(crate) fn percentage(value: Decimal, rate: Decimal) -> Decimal {
    match value.checked_mul(rate) {
        Some(product) => product / dec!(100),
        None => (value / dec!(100)).saturating_mul(rate),
    }
}

/// Sum that saturates at the `Decimal` bounds instead of panicking.
pub(crate) fn sum_money(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}
