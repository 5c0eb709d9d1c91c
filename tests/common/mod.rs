//! Shared test helpers.
#![allow(dead_code)]

use smartval::application::generate_data::GeneratorConfig;
use smartval::application::train_model::TrainerConfig;
use smartval::domain::entities::item::ItemFeatures;
use smartval::domain::entities::valuation::ValuationRecord;
use smartval::domain::error::DomainError;
use smartval::domain::ports::estimator::Estimator;
use smartval::domain::ports::history_repository::HistoryRepository;
use smartval::infrastructure::model::artifact::ModelArtifact;
use smartval::infrastructure::model::random_forest::ForestParams;
use smartval::SmartVal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Estimator that always returns the same raw value.
pub struct FixedEstimator(pub f64);

impl Estimator for FixedEstimator {
    fn estimate(&self, _features: &ItemFeatures) -> f64 {
        self.0
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// History store whose storage is permanently down.
pub struct FailingHistory;

impl HistoryRepository for FailingHistory {
    fn append(&self, _record: &ValuationRecord) -> Result<ValuationRecord, DomainError> {
        Err(DomainError::Persistence("disk I/O error".into()))
    }

    fn list(&self) -> Result<Vec<ValuationRecord>, DomainError> {
        Err(DomainError::Persistence("disk I/O error".into()))
    }
}

pub fn setup(estimator: Option<Arc<dyn Estimator>>) -> SmartVal {
    SmartVal::with_components(":memory:", estimator).unwrap()
}

pub fn with_raw(raw: f64) -> SmartVal {
    setup(Some(Arc::new(FixedEstimator(raw))))
}

pub struct TrainedFixture {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub artifact: ModelArtifact,
}

/// Generate a small seeded dataset and train a small forest on it.
pub fn train_small_model(dir: &Path) -> TrainedFixture {
    let data_path = dir.join("market_data.csv");
    let model_path = dir.join("price_model.json");
    smartval::generate_dataset(
        GeneratorConfig {
            samples: 1500,
            seed: Some(2024),
            ..GeneratorConfig::default()
        },
        &data_path,
    )
    .unwrap();

    let trainer = TrainerConfig {
        forest: ForestParams {
            n_trees: 20,
            ..ForestParams::default()
        },
        ..TrainerConfig::default()
    };
    let artifact = smartval::train_model(trainer, &data_path, &model_path).unwrap();

    TrainedFixture {
        data_path,
        model_path,
        artifact,
    }
}
