pub mod dataset;
pub mod http;
pub mod model;
pub mod sqlite;
