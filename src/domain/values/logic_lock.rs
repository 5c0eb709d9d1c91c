//! Business-rule bounds applied to every raw model output before it is served.

/// An item never resells at or above its original price; this fraction is
/// served instead.
pub const CEILING_RATIO: f64 = 0.85;

/// Floor served when the model returns a negative (or undefined) value.
pub const FLOOR_RATIO: f64 = 0.10;

/// Which correction, if any, the lock applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockAction {
    Kept,
    Ceiling,
    Floor,
}

/// Clamp a raw estimate into the plausible resale range and round it to
/// currency precision. The served value stays within `0..=original_price`
/// even when rounding would carry it past the original price.
pub fn apply(raw_estimate: f64, original_price: f64) -> (f64, LockAction) {
    let (value, action) = if raw_estimate >= original_price {
        (original_price * CEILING_RATIO, LockAction::Ceiling)
    } else if raw_estimate < 0.0 || raw_estimate.is_nan() {
        (original_price * FLOOR_RATIO, LockAction::Floor)
    } else {
        (raw_estimate, LockAction::Kept)
    };
    let rounded = round_currency(value);
    if rounded > original_price {
        return (floor_currency(original_price).min(original_price), action);
    }
    (rounded, action)
}

pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn floor_currency(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}
