use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on every reported score.
pub const SCORE_DECIMAL_PLACES: u32 = 2;

/// Round to `dp` places, ties going to the even neighbour.
pub fn round_half_even(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
}

/// Convert a 1-10 rating to the 0-100 scale.
pub fn normalize_rating(rating: Decimal) -> Decimal {
    rating / Decimal::TEN * Decimal::ONE_HUNDRED
}

/// Arithmetic mean of a series of values
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }

    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len()))
}
