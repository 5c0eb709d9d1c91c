use serde::{Deserialize, Serialize};

/// Held-out evaluation of a trained estimator. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub train_rows: usize,
    pub test_rows: usize,
    pub trees: usize,
    /// Coefficient of determination on the held-out rows.
    pub r2: f64,
    /// Mean absolute error in currency units.
    pub mae: f64,
}
