pub mod estimator;
pub mod history_repository;
