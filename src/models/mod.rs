pub mod analytics;
pub mod record;
