use crate::domain::entities::market_record::MarketRecord;
use crate::domain::entities::training_report::TrainingReport;
use crate::domain::error::DomainError;
use crate::infrastructure::dataset::csv_store::read_dataset;
use crate::infrastructure::model::artifact::ModelArtifact;
use crate::infrastructure::model::random_forest::{FeatureRow, ForestParams, RandomForest};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub forest: ForestParams,
    /// Share of rows held out for evaluation.
    pub test_ratio: f64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            forest: ForestParams::default(),
            test_ratio: 0.2,
        }
    }
}

/// Train/evaluation partition of a dataset.
pub struct Split<'a> {
    pub train: Vec<&'a MarketRecord>,
    pub test: Vec<&'a MarketRecord>,
}

pub struct TrainModelUseCase {
    config: TrainerConfig,
}

impl TrainModelUseCase {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Read the dataset at `data_path`, fit, evaluate, and write the model
    /// artifact to `model_path`.
    pub fn execute(&self, data_path: &Path, model_path: &Path) -> Result<ModelArtifact, DomainError> {
        let records = read_dataset(data_path)?;
        let artifact = self.fit(&records)?;
        artifact.save(model_path)?;
        tracing::info!(path = %model_path.display(), "model artifact saved");
        Ok(artifact)
    }

    pub fn fit(&self, records: &[MarketRecord]) -> Result<ModelArtifact, DomainError> {
        let split = self.split(records)?;

        let (x, y) = to_matrix(&split.train);
        let forest = RandomForest::fit(&x, &y, self.config.forest.clone())?;

        let (test_x, test_y) = to_matrix(&split.test);
        let predicted: Vec<f64> = test_x.iter().map(|row| forest.predict_row(row)).collect();
        let report = TrainingReport {
            train_rows: split.train.len(),
            test_rows: split.test.len(),
            trees: forest.tree_count(),
            r2: r2_score(&test_y, &predicted),
            mae: mean_absolute_error(&test_y, &predicted),
        };
        tracing::info!(
            train_rows = report.train_rows,
            test_rows = report.test_rows,
            r2 = report.r2,
            mae = report.mae,
            "model trained"
        );

        Ok(ModelArtifact::new(forest, report))
    }

    /// Shuffle with the forest seed and hold out `test_ratio` of the rows.
    pub fn split<'a>(&self, records: &'a [MarketRecord]) -> Result<Split<'a>, DomainError> {
        if records.is_empty() {
            return Err(DomainError::DataUnavailable("Dataset has no rows".into()));
        }
        let n = records.len();
        let test_n = ((n as f64) * self.config.test_ratio).round() as usize;
        if test_n == 0 || test_n >= n {
            return Err(DomainError::DataUnavailable(format!(
                "{n} rows cannot be split {:.0}/{:.0} into non-empty partitions",
                (1.0 - self.config.test_ratio) * 100.0,
                self.config.test_ratio * 100.0
            )));
        }

        let mut order: Vec<&MarketRecord> = records.iter().collect();
        order.shuffle(&mut ChaCha8Rng::seed_from_u64(self.config.forest.seed));
        let train = order.split_off(test_n);
        Ok(Split { train, test: order })
    }
}

fn to_matrix(records: &[&MarketRecord]) -> (Vec<FeatureRow>, Vec<f64>) {
    records
        .iter()
        .map(|r| (r.features().to_vector(), r.resale_price))
        .unzip()
}

pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let total: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p).abs()).sum();
    total / actual.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::item::ValuationRequest;

    fn records(n: usize) -> Vec<MarketRecord> {
        (0..n)
            .map(|i| {
                let f = ValuationRequest::new(10_000.0 + i as f64, (i % 11) as i64, 3, 1)
                    .validate()
                    .unwrap();
                MarketRecord::new(f, 5_000.0)
            })
            .collect()
    }

    #[test]
    fn test_split_is_eighty_twenty_and_reproducible() {
        let data = records(100);
        let uc = TrainModelUseCase::new(TrainerConfig::default());
        let a = uc.split(&data).unwrap();
        let b = uc.split(&data).unwrap();
        assert_eq!(a.train.len(), 80);
        assert_eq!(a.test.len(), 20);
        assert_eq!(a.test, b.test);
    }

    #[test]
    fn test_too_small_to_split() {
        let uc = TrainModelUseCase::new(TrainerConfig::default());
        assert!(matches!(uc.split(&records(1)), Err(DomainError::DataUnavailable(_))));
        assert!(matches!(uc.split(&[]), Err(DomainError::DataUnavailable(_))));
    }

    #[test]
    fn test_metrics() {
        let actual = [1.0, 2.0, 3.0];
        assert_eq!(r2_score(&actual, &actual), 1.0);
        assert_eq!(mean_absolute_error(&actual, &[2.0, 2.0, 2.0]), 2.0 / 3.0);
        assert_eq!(r2_score(&actual, &[2.0, 2.0, 2.0]), 0.0);
    }
}
