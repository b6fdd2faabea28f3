//! Vacation request use-cases

pub mod service;

pub use service::VacationService;
