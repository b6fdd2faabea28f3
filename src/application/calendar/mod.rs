//! Calendar feeds of approved vacation requests

pub mod service;

pub use service::{CalendarService, FeedUrls};
