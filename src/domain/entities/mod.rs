pub mod item;
pub mod market_record;
pub mod training_report;
pub mod valuation;
