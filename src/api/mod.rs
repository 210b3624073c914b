pub mod error;
pub mod health;
pub mod job;
pub mod validation;
