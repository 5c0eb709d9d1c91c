pub mod brand_tier;
pub mod condition;
pub mod depreciation;
pub mod logic_lock;
