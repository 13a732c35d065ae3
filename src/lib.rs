pub mod analytics;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use config::AppConfig;
pub use routes::{create_app, AppState};
