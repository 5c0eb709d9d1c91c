pub mod generate_data;
pub mod history;
pub mod predict;
pub mod train_model;
