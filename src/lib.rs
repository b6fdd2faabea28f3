//! # Vacation Tracker
//!
//! Employees submit time-off requests, administrators approve or reject
//! them, and approved requests are published as iCalendar feeds.
//!
//! ## Architecture
//!
//! - **domain**: entities, input DTOs, repository traits and errors
//! - **application**: authorization policy and use-case services
//! - **infrastructure**: SQLite (sea-orm) and in-memory stores, JWT,
//!   bcrypt, iCalendar rendering
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime lifecycle shared by the binary and tests

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, Repositories};

pub use interfaces::http::create_api_router;
