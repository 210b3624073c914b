pub mod connection;
pub mod job_repository;
#[cfg(test)]
pub mod memory;
pub mod migrations;
pub mod models;

pub use job_repository::{JobStore, PgJobRepository};
pub use models::JobRow;
