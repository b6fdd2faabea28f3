//! iCalendar rendering
//!
//! Thin adapter over the `icalendar` crate. Events are all-day: the
//! exclusive `DTEND` is the day after the inclusive end date.

use chrono::{Days, NaiveDate};
use icalendar::{Calendar, Component, Event, EventLike, Property};

/// One all-day entry of a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEvent {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub start_date: NaiveDate,
    /// Inclusive last day.
    pub end_date: NaiveDate,
    pub organizer_name: String,
    pub organizer_email: String,
}

/// Render a complete `VCALENDAR` document.
pub fn render_calendar(name: &str, description: &str, events: &[FeedEvent]) -> String {
    let mut calendar = Calendar::new();
    calendar.name(name).description(description).timezone("UTC");

    for item in events {
        let exclusive_end = item
            .end_date
            .checked_add_days(Days::new(1))
            .unwrap_or(item.end_date);

        let mut organizer = Property::new("ORGANIZER", format!("mailto:{}", item.organizer_email));
        organizer.add_parameter("CN", &item.organizer_name);

        let event = Event::new()
            .uid(&item.uid)
            .summary(&item.summary)
            .description(&item.description)
            .starts(item.start_date)
            .ends(exclusive_end)
            .append_property(organizer)
            .done();
        calendar.push(event);
    }

    calendar.done().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn renders_all_day_events() {
        let events = vec![FeedEvent {
            uid: "v-1".into(),
            summary: "Bob - Trip".into(),
            description: "Beach".into(),
            start_date: date("2024-06-01"),
            end_date: date("2024-06-10"),
            organizer_name: "Bob".into(),
            organizer_email: "bob@x.com".into(),
        }];

        let ics = render_calendar("Team Vacation Calendar", "All approved", &events);
        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert!(ics.contains("BEGIN:VEVENT"));
        assert!(ics.contains("UID:v-1"));
        assert!(ics.contains("SUMMARY:Bob - Trip"));
        assert!(ics.contains("20240601"));
        assert!(ics.contains("20240611"));
        assert!(ics.contains("mailto:bob@x.com"));
        assert!(ics.contains("Team Vacation Calendar"));
    }

    #[test]
    fn empty_feed_is_still_a_calendar() {
        let ics = render_calendar("Personal Vacation Calendar", "", &[]);
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("END:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }
}
