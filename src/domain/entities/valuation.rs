use crate::domain::entities::item::ItemFeatures;
use crate::domain::values::brand_tier::BrandTier;
use crate::domain::values::condition::Condition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A served valuation as stored in the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRecord {
    /// Assigned by the store on append; `None` until then.
    pub id: Option<i64>,
    pub original_price: f64,
    pub age: u32,
    pub condition: Condition,
    pub brand_tier: BrandTier,
    pub estimated_price: f64,
    pub created_at: DateTime<Utc>,
}

impl ValuationRecord {
    pub fn new(features: &ItemFeatures, estimated_price: f64) -> Self {
        Self {
            id: None,
            original_price: features.original_price,
            age: features.age,
            condition: features.condition,
            brand_tier: features.brand_tier,
            estimated_price,
            created_at: Utc::now(),
        }
    }
}

/// Result of a prediction. `estimated_price` is authoritative; history
/// logging reports separately through `history_id` or `logging_fault`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub estimated_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging_fault: Option<String>,
}

/// One point of a multi-year value projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub years_ahead: u32,
    pub age: u32,
    pub estimated_price: f64,
}
