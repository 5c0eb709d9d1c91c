use crate::domain::entities::item::ItemFeatures;

/// No item loses more than this fraction of its value through wear and age.
pub const MAX_DEPRECIATION: f64 = 0.90;

/// Resale ceiling applied when market noise pushes a price above original.
pub const LIKE_NEW_CEILING: f64 = 0.90;

/// Fraction of original value lost: `rate × age + condition_factor`,
/// capped at [`MAX_DEPRECIATION`].
pub fn depreciation_fraction(features: &ItemFeatures) -> f64 {
    let rate = features.brand_tier.annual_depreciation();
    let total = rate * f64::from(features.age) + features.condition.loss_factor();
    total.min(MAX_DEPRECIATION)
}

/// Noise-free resale price of an item under the market depreciation model.
pub fn expected_resale_price(features: &ItemFeatures) -> f64 {
    features.original_price * (1.0 - depreciation_fraction(features))
}
