use crate::domain::entities::valuation::ValuationRecord;
use crate::domain::error::DomainError;

/// Append-only log of served valuations.
pub trait HistoryRepository: Send + Sync {
    /// Persist `record` and return it with its assigned id. Ids increase
    /// monotonically and are never reused.
    fn append(&self, record: &ValuationRecord) -> Result<ValuationRecord, DomainError>;

    /// Every record, oldest first.
    fn list(&self) -> Result<Vec<ValuationRecord>, DomainError>;
}
