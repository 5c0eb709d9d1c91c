pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::generate_data::{GeneratorConfig, MarketDataGenerator};
use crate::application::history::HistoryUseCase;
use crate::application::predict::PredictUseCase;
use crate::application::train_model::{TrainModelUseCase, TrainerConfig};
use crate::config::Config;
use crate::domain::entities::item::ValuationRequest;
use crate::domain::entities::market_record::MarketRecord;
use crate::domain::entities::valuation::{ForecastPoint, Valuation, ValuationRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::estimator::Estimator;
use crate::domain::ports::history_repository::HistoryRepository;
use crate::infrastructure::dataset::csv_store::write_dataset;
use crate::infrastructure::model::artifact::ModelArtifact;
use crate::infrastructure::sqlite::history_repo::SqliteHistoryRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

/// Serving-side facade: the loaded estimator plus the valuation history.
pub struct SmartVal {
    predict_uc: PredictUseCase,
    history_uc: HistoryUseCase,
}

impl SmartVal {
    /// Open the history database and try to load the model artifact. A
    /// missing or unreadable model leaves the service up without predictions.
    pub fn open(config: &Config) -> Result<Self, DomainError> {
        let estimator: Option<Arc<dyn Estimator>> = match ModelArtifact::load(&config.model_path) {
            Ok(artifact) => {
                tracing::info!(
                    path = %config.model_path.display(),
                    trees = artifact.report.trees,
                    r2 = artifact.report.r2,
                    "model loaded"
                );
                Some(Arc::new(artifact.forest))
            }
            Err(e) => {
                tracing::warn!(error = %e, "starting without a model; predictions are unavailable");
                None
            }
        };
        Self::with_components(&config.db_path, estimator)
    }

    pub fn with_components(
        db_path: &str,
        estimator: Option<Arc<dyn Estimator>>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Persistence(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Persistence(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;

        Ok(Self::with_history(estimator, Arc::new(SqliteHistoryRepo::new(conn))))
    }

    pub fn with_history(
        estimator: Option<Arc<dyn Estimator>>,
        history: Arc<dyn HistoryRepository>,
    ) -> Self {
        Self {
            predict_uc: PredictUseCase::new(estimator, history.clone()),
            history_uc: HistoryUseCase::new(history),
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.predict_uc.model_name().is_some()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.predict_uc.model_name()
    }

    pub fn predict(&self, request: &ValuationRequest) -> Result<Valuation, DomainError> {
        self.predict_uc.predict(request)
    }

    pub fn forecast(&self, request: &ValuationRequest, years: u32) -> Result<Vec<ForecastPoint>, DomainError> {
        self.predict_uc.forecast(request, years)
    }

    pub fn history(&self) -> Result<Vec<ValuationRecord>, DomainError> {
        self.history_uc.list()
    }
}

/// Generate a synthetic dataset and write it to `out`.
pub fn generate_dataset(config: GeneratorConfig, out: &Path) -> Result<Vec<MarketRecord>, DomainError> {
    let records = MarketDataGenerator::new(config)?.generate();
    write_dataset(out, &records)?;
    Ok(records)
}

/// Train on the dataset at `data` and persist the model to `model`.
pub fn train_model(config: TrainerConfig, data: &Path, model: &Path) -> Result<ModelArtifact, DomainError> {
    TrainModelUseCase::new(config).execute(data, model)
}
