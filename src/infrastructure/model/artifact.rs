use crate::domain::entities::item::FEATURE_COLUMNS;
use crate::domain::entities::training_report::TrainingReport;
use crate::domain::error::DomainError;
use crate::infrastructure::model::random_forest::RandomForest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// The persisted trained model: the forest plus the column order it was
/// fitted on and its evaluation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_columns: Vec<String>,
    pub trained_at: DateTime<Utc>,
    pub report: TrainingReport,
    pub forest: RandomForest,
}

impl ModelArtifact {
    pub fn new(forest: RandomForest, report: TrainingReport) -> Self {
        Self {
            feature_columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            trained_at: Utc::now(),
            report,
            forest,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), DomainError> {
        let file = File::create(path)
            .map_err(|e| DomainError::Artifact(format!("Cannot create {}: {e}", path.display())))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)
            .map_err(|e| DomainError::Artifact(format!("Failed to write model: {e}")))?;
        writer.flush()?;
        Ok(())
    }

    /// Load an artifact and check it was fitted on the current feature schema.
    pub fn load(path: &Path) -> Result<Self, DomainError> {
        if !path.exists() {
            return Err(DomainError::ModelUnavailable(format!(
                "No trained model at {}. Run `smartval train` first.",
                path.display()
            )));
        }
        let file = File::open(path)
            .map_err(|e| DomainError::Artifact(format!("Cannot open {}: {e}", path.display())))?;
        let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| DomainError::Artifact(format!("Corrupt model artifact: {e}")))?;

        if artifact.feature_columns != FEATURE_COLUMNS {
            return Err(DomainError::Artifact(format!(
                "Model was trained on columns {:?}, expected {:?}",
                artifact.feature_columns, FEATURE_COLUMNS
            )));
        }
        if artifact.forest.tree_count() == 0 {
            return Err(DomainError::Artifact("Model artifact contains no trees".into()));
        }
        Ok(artifact)
    }
}
