//! Infrastructure layer - external concerns

pub mod calendar;
pub mod crypto;
pub mod database;
pub mod storage;

pub use database::{init_database, DatabaseConfig, Repositories};
pub use storage::{InMemoryUserRepository, InMemoryVacationRepository};
