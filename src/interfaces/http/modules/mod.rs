pub mod auth;
pub mod calendar;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod users;
pub mod vacations;
