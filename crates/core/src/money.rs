//! Decimal money rules.
//!
//! Amounts are carried as [`Decimal`] end to end. Binary floating point never
//! touches a total; two-decimal formatting happens only when rendering.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places used for money and for every rendered numeric cell.
pub const MONEY_SCALE: u32 = 2;

/// Round to [`MONEY_SCALE`] places, half away from zero (3762.505 -> 3762.51).
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Format with exactly two decimal places: `850` -> `"850.00"`.
pub fn format_money(value: Decimal) -> String {
    round_money(value).to_string()
}
