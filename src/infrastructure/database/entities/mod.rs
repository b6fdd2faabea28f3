//! SeaORM entities

pub mod user;
pub mod vacation;
