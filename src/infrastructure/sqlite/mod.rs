pub mod history_repo;
pub mod migrations;
