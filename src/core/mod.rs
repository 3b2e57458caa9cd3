pub mod errors;
pub mod models;
pub mod query;
pub mod services;
pub mod traits;
