use crate::domain::error::DomainError;
use crate::domain::values::brand_tier::BrandTier;
use crate::domain::values::condition::Condition;
use serde::{Deserialize, Serialize};

/// Canonical model input order, shared by the dataset, the trainer and the
/// persisted artifact.
pub const FEATURE_COLUMNS: [&str; 4] = ["original_price", "age", "condition", "brand_tier"];

/// Largest accepted original price. Cent arithmetic stays exact below it.
pub const MAX_ORIGINAL_PRICE: f64 = 1.0e12;

/// The validated four inputs every stage of the pipeline agrees on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemFeatures {
    pub original_price: f64,
    pub age: u32,
    pub condition: Condition,
    pub brand_tier: BrandTier,
}

impl ItemFeatures {
    /// Feature vector in [`FEATURE_COLUMNS`] order.
    pub fn to_vector(&self) -> [f64; 4] {
        [
            self.original_price,
            f64::from(self.age),
            f64::from(self.condition.value()),
            f64::from(self.brand_tier.value()),
        ]
    }

    pub fn with_age(&self, age: u32) -> Self {
        Self { age, ..*self }
    }
}

/// An unvalidated valuation request as received from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    pub original_price: f64,
    pub age: i64,
    pub condition: i64,
    pub brand_tier: i64,
}

impl ValuationRequest {
    pub fn new(original_price: f64, age: i64, condition: i64, brand_tier: i64) -> Self {
        Self {
            original_price,
            age,
            condition,
            brand_tier,
        }
    }

    pub fn validate(&self) -> Result<ItemFeatures, DomainError> {
        if !self.original_price.is_finite() || self.original_price <= 0.0 {
            return Err(DomainError::Validation(format!(
                "original_price must be a positive amount, got {}",
                self.original_price
            )));
        }
        if self.original_price > MAX_ORIGINAL_PRICE {
            return Err(DomainError::Validation(format!(
                "original_price must not exceed {MAX_ORIGINAL_PRICE}, got {}",
                self.original_price
            )));
        }
        let age = u32::try_from(self.age).map_err(|_| {
            DomainError::Validation(format!("age must be a non-negative number of years, got {}", self.age))
        })?;
        let condition = Condition::new(self.condition).map_err(DomainError::Validation)?;
        let brand_tier = BrandTier::new(self.brand_tier).map_err(DomainError::Validation)?;

        Ok(ItemFeatures {
            original_price: self.original_price,
            age,
            condition,
            brand_tier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let f = ValuationRequest::new(100_000.0, 5, 3, 2).validate().unwrap();
        assert_eq!(f.age, 5);
        assert_eq!(f.brand_tier, BrandTier::Mid);
        assert_eq!(f.to_vector(), [100_000.0, 5.0, 3.0, 2.0]);
    }

    #[test]
    fn test_rejects_each_bad_field() {
        let bad = [
            ValuationRequest::new(0.0, 1, 3, 2),
            ValuationRequest::new(-10.0, 1, 3, 2),
            ValuationRequest::new(f64::NAN, 1, 3, 2),
            ValuationRequest::new(f64::INFINITY, 1, 3, 2),
            ValuationRequest::new(1.0e307, 1, 3, 2),
            ValuationRequest::new(1_000.0, -1, 3, 2),
            ValuationRequest::new(1_000.0, 1, 0, 2),
            ValuationRequest::new(1_000.0, 1, 3, 4),
        ];
        for req in bad {
            assert!(matches!(req.validate(), Err(DomainError::Validation(_))), "{req:?}");
        }
    }

    #[test]
    fn test_price_limit_is_inclusive() {
        assert!(ValuationRequest::new(MAX_ORIGINAL_PRICE, 1, 3, 2).validate().is_ok());
    }
}
