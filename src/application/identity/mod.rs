//! Identity module: authentication and user management
//!
//! Contains the `UserService` which orchestrates login, token resolution,
//! admin user CRUD and the default-admin bootstrap.

pub mod service;

pub use service::{AuthResult, DefaultAdmin, UserService};
