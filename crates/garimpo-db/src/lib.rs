pub mod config;
pub mod config_repository;
pub mod database;
pub mod job_repository;

pub use config::DatabaseConfig;
pub use config_repository::{ConfigRepository, UpdateSearchConfig};
pub use database::Database;
pub use job_repository::{JobFilter, JobRepository};
