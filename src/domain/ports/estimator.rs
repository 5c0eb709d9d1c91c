use crate::domain::entities::item::ItemFeatures;

/// A trained regression function over [`ItemFeatures`]. Implementations are
/// read-only after construction and shared across request handlers.
pub trait Estimator: Send + Sync {
    /// Raw, unbounded resale estimate.
    fn estimate(&self, features: &ItemFeatures) -> f64;

    fn name(&self) -> &str;
}
