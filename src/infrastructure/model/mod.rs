pub mod artifact;
pub mod random_forest;
