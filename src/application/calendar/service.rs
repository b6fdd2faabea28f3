//! Calendar feed service
//!
//! Feeds are public by link: anyone holding the URL of a personal feed
//! sees that user's approved time off.

use std::sync::Arc;

use crate::application::policy::{require_active, Caller};
use crate::domain::{DomainResult, VacationRepositoryInterface, VacationRequest};
use crate::infrastructure::calendar::{render_calendar, FeedEvent};

pub const PERSONAL_CALENDAR_NAME: &str = "Personal Vacation Calendar";
pub const TEAM_CALENDAR_NAME: &str = "Team Vacation Calendar";

/// Absolute subscription URLs for a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUrls {
    pub personal_feed: String,
    pub team_feed: String,
}

#[derive(Clone)]
pub struct CalendarService {
    repo: Arc<dyn VacationRepositoryInterface>,
}

impl CalendarService {
    pub fn new(repo: Arc<dyn VacationRepositoryInterface>) -> Self {
        Self { repo }
    }

    /// Approved records of one user. Unknown ids yield an empty calendar.
    pub async fn personal_feed(&self, user_id: &str) -> DomainResult<String> {
        let events: Vec<FeedEvent> = self
            .repo
            .list_vacations_for_user(user_id)
            .await?
            .into_iter()
            .filter(VacationRequest::is_approved)
            .map(|v| to_event(v, false))
            .collect();

        Ok(render_calendar(
            PERSONAL_CALENDAR_NAME,
            "Approved vacation requests for the user",
            &events,
        ))
    }

    /// Approved records of everyone, summaries prefixed with the owner name.
    pub async fn team_feed(&self) -> DomainResult<String> {
        let events: Vec<FeedEvent> = self
            .repo
            .list_all_vacations()
            .await?
            .into_iter()
            .filter(VacationRequest::is_approved)
            .map(|v| to_event(v, true))
            .collect();

        Ok(render_calendar(
            TEAM_CALENDAR_NAME,
            "All approved vacation requests for the team",
            &events,
        ))
    }

    pub fn feed_urls(&self, caller: &Caller, base_url: &str) -> DomainResult<FeedUrls> {
        require_active(caller)?;
        let base = base_url.trim_end_matches('/');
        Ok(FeedUrls {
            personal_feed: format!("{}/api/v1/calendar/feed/{}", base, caller.id),
            team_feed: format!("{}/api/v1/calendar/team-feed", base),
        })
    }
}

fn to_event(vacation: VacationRequest, with_owner: bool) -> FeedEvent {
    let summary = if with_owner {
        format!("{} - {}", vacation.owner.name, vacation.title)
    } else {
        vacation.title
    };
    FeedEvent {
        uid: vacation.id,
        summary,
        description: vacation.description.unwrap_or_default(),
        start_date: vacation.start_date,
        end_date: vacation.end_date,
        organizer_name: vacation.owner.name,
        organizer_email: vacation.owner.email,
    }
}
