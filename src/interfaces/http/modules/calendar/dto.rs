//! Calendar DTOs

use serde::Serialize;
use utoipa::ToSchema;

use crate::application::FeedUrls;

/// Subscription links for the caller
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedUrlsResponse {
    pub personal_feed: String,
    pub team_feed: String,
}

impl From<FeedUrls> for FeedUrlsResponse {
    fn from(urls: FeedUrls) -> Self {
        Self {
            personal_feed: urls.personal_feed,
            team_feed: urls.team_feed,
        }
    }
}
