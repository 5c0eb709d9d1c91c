use crate::domain::entities::item::{ItemFeatures, ValuationRequest};
use crate::domain::entities::valuation::{ForecastPoint, Valuation, ValuationRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::estimator::Estimator;
use crate::domain::ports::history_repository::HistoryRepository;
use crate::domain::values::logic_lock::{self, LockAction};
use std::sync::Arc;

/// Longest projection `forecast` will produce.
pub const MAX_FORECAST_YEARS: u32 = 30;

pub struct PredictUseCase {
    estimator: Option<Arc<dyn Estimator>>,
    history: Arc<dyn HistoryRepository>,
}

impl PredictUseCase {
    pub fn new(estimator: Option<Arc<dyn Estimator>>, history: Arc<dyn HistoryRepository>) -> Self {
        Self { estimator, history }
    }

    pub fn model_name(&self) -> Option<&str> {
        self.estimator.as_deref().map(|e| e.name())
    }

    /// Value one item and log it. The returned price stands even when the
    /// history append fails; the failure comes back as `logging_fault`.
    pub fn predict(&self, request: &ValuationRequest) -> Result<Valuation, DomainError> {
        let estimator = self.estimator()?;
        let features = request.validate()?;
        let estimated_price = bounded_estimate(estimator, &features);

        let (history_id, logging_fault) =
            match self.history.append(&ValuationRecord::new(&features, estimated_price)) {
                Ok(stored) => (stored.id, None),
                Err(e) => {
                    tracing::warn!(error = %e, estimated_price, "valuation served but not logged");
                    (None, Some(e.to_string()))
                }
            };

        Ok(Valuation {
            estimated_price,
            history_id,
            logging_fault,
        })
    }

    /// Bounded estimates for the same item at its current age and each of the
    /// next `years` years. Nothing is logged.
    pub fn forecast(&self, request: &ValuationRequest, years: u32) -> Result<Vec<ForecastPoint>, DomainError> {
        let estimator = self.estimator()?;
        let features = request.validate()?;
        if years > MAX_FORECAST_YEARS {
            return Err(DomainError::Validation(format!(
                "forecast horizon must be at most {MAX_FORECAST_YEARS} years, got {years}"
            )));
        }

        Ok((0..=years)
            .map(|ahead| {
                let aged = features.with_age(features.age.saturating_add(ahead));
                ForecastPoint {
                    years_ahead: ahead,
                    age: aged.age,
                    estimated_price: bounded_estimate(estimator, &aged),
                }
            })
            .collect())
    }

    fn estimator(&self) -> Result<&dyn Estimator, DomainError> {
        self.estimator
            .as_deref()
            .ok_or_else(|| DomainError::ModelUnavailable("No trained model is loaded".into()))
    }
}

fn bounded_estimate(estimator: &dyn Estimator, features: &ItemFeatures) -> f64 {
    let raw = estimator.estimate(features);
    let (price, action) = logic_lock::apply(raw, features.original_price);
    if action != LockAction::Kept {
        tracing::debug!(
            raw,
            price,
            ?action,
            condition = %features.condition,
            brand_tier = %features.brand_tier,
            "logic lock corrected estimate"
        );
    }
    price
}
