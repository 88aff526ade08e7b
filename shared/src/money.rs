//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done in `Decimal` and rounded half-up to 2 places
//! before conversion back to `f64`. Backend records store prices as plain
//! JSON numbers, so `f64` stays the serialized representation.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to 2 decimal places (half-up)
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| {
            d.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
                .to_f64()
                .unwrap_or(value)
        })
        .unwrap_or(value)
}

/// Line total: unit price × quantity, rounded
pub fn line_total(unit_price: f64, quantity: i32) -> f64 {
    let price = Decimal::from_f64(unit_price).unwrap_or_default();
    let qty = Decimal::from(quantity);
    (price * qty)
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(unit_price * quantity as f64)
}

/// Sum of (unit price, quantity) pairs, rounded once at the end
pub fn sum_lines<I>(lines: I) -> f64
where
    I: IntoIterator<Item = (f64, i32)>,
{
    let total = lines
        .into_iter()
        .map(|(price, qty)| Decimal::from_f64(price).unwrap_or_default() * Decimal::from(qty))
        .sum::<Decimal>();
    total
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}
