//! Calendar module: iCalendar feeds and subscription links

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
