use crate::domain::entities::valuation::ValuationRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::history_repository::HistoryRepository;
use std::sync::Arc;

pub struct HistoryUseCase {
    repo: Arc<dyn HistoryRepository>,
}

impl HistoryUseCase {
    pub fn new(repo: Arc<dyn HistoryRepository>) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> Result<Vec<ValuationRecord>, DomainError> {
        self.repo.list()
    }
}
