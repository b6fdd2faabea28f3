//! Application layer: use-cases on top of the domain

pub mod calendar;
pub mod identity;
pub mod policy;
pub mod vacations;

pub use calendar::{CalendarService, FeedUrls};
pub use identity::{AuthResult, DefaultAdmin, UserService};
pub use policy::Caller;
pub use vacations::VacationService;
