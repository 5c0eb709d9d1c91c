use crate::domain::entities::item::{ItemFeatures, MAX_ORIGINAL_PRICE};
use crate::domain::values::brand_tier::BrandTier;
use crate::domain::values::condition::Condition;
use serde::{Deserialize, Serialize};

/// One labeled row of synthetic market data. Field order matches the
/// dataset header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub original_price: f64,
    pub age: u32,
    pub condition: Condition,
    pub brand_tier: BrandTier,
    pub resale_price: f64,
}

impl MarketRecord {
    pub fn new(features: ItemFeatures, resale_price: f64) -> Self {
        Self {
            original_price: features.original_price,
            age: features.age,
            condition: features.condition,
            brand_tier: features.brand_tier,
            resale_price,
        }
    }

    pub fn features(&self) -> ItemFeatures {
        ItemFeatures {
            original_price: self.original_price,
            age: self.age,
            condition: self.condition,
            brand_tier: self.brand_tier,
        }
    }

    /// Check the value invariants a row read from outside must satisfy:
    /// finite prices, `0 < original_price <= MAX_ORIGINAL_PRICE` and
    /// `0 <= resale_price <= original_price`.
    pub fn check(&self) -> Result<(), String> {
        if !self.original_price.is_finite()
            || self.original_price <= 0.0
            || self.original_price > MAX_ORIGINAL_PRICE
        {
            return Err(format!("original_price out of range: {}", self.original_price));
        }
        if !self.resale_price.is_finite() || self.resale_price < 0.0 {
            return Err(format!("resale_price out of range: {}", self.resale_price));
        }
        if self.resale_price > self.original_price {
            return Err(format!(
                "resale_price {} exceeds original_price {}",
                self.resale_price, self.original_price
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(original_price: f64, resale_price: f64) -> MarketRecord {
        MarketRecord {
            original_price,
            age: 2,
            condition: Condition::ALL[2],
            brand_tier: BrandTier::Mid,
            resale_price,
        }
    }

    #[test]
    fn test_check_accepts_plausible_rows() {
        assert!(record(30_000.0, 18_000.0).check().is_ok());
        assert!(record(30_000.0, 0.0).check().is_ok());
        assert!(record(30_000.0, 30_000.0).check().is_ok());
    }

    #[test]
    fn test_check_rejects_broken_rows() {
        for (original, resale) in [
            (0.0, 0.0),
            (-1.0, 0.0),
            (f64::NAN, 10.0),
            (f64::INFINITY, 10.0),
            (30_000.0, f64::NAN),
            (30_000.0, -5.0),
            (30_000.0, 30_000.01),
        ] {
            assert!(record(original, resale).check().is_err(), "{original} {resale}");
        }
    }
}
