//! Calendar feed handlers
//!
//! `feed/{user_id}` and `team-feed` are public so calendar clients can
//! subscribe without credentials.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};

use super::dto::FeedUrlsResponse;
use crate::application::{CalendarService, Caller};
use crate::interfaces::http::common::{error_response, ok, ApiResponse, ApiResult};

const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

#[derive(Clone)]
pub struct CalendarHandlerState {
    pub calendar: CalendarService,
    /// Overrides the base URL otherwise derived from request headers.
    pub public_url: Option<String>,
}

fn calendar_response(body: String, filename: &str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, CALENDAR_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

/// `{proto}://{host}` from proxy headers, falling back to `http://localhost`.
fn base_url_from_headers(headers: &HeaderMap) -> String {
    let proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get("x-forwarded-host")
        .or_else(|| headers.get(header::HOST))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("{}://{}", proto, host)
}

#[utoipa::path(
    get,
    path = "/api/v1/calendar/feed/{user_id}",
    tag = "Calendar",
    params(("user_id" = String, Path, description = "Owner of the feed")),
    responses(
        (status = 200, description = "iCalendar document of the user's approved requests", body = String, content_type = "text/calendar")
    )
)]
pub async fn personal_feed(
    State(state): State<CalendarHandlerState>,
    Path(user_id): Path<String>,
) -> Response {
    match state.calendar.personal_feed(&user_id).await {
        Ok(body) => calendar_response(body, "vacation-calendar.ics"),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/calendar/team-feed",
    tag = "Calendar",
    responses(
        (status = 200, description = "iCalendar document of all approved requests", body = String, content_type = "text/calendar")
    )
)]
pub async fn team_feed(State(state): State<CalendarHandlerState>) -> Response {
    match state.calendar.team_feed().await {
        Ok(body) => calendar_response(body, "team-vacation-calendar.ics"),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/calendar/urls",
    tag = "Calendar",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Feed URLs for the caller", body = ApiResponse<FeedUrlsResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn feed_urls(
    State(state): State<CalendarHandlerState>,
    Extension(caller): Extension<Caller>,
    headers: HeaderMap,
) -> ApiResult<FeedUrlsResponse> {
    let base = state
        .public_url
        .clone()
        .unwrap_or_else(|| base_url_from_headers(&headers));
    let urls = state
        .calendar
        .feed_urls(&caller, &base)
        .map_err(error_response)?;
    ok(FeedUrlsResponse::from(urls))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn base_url_prefers_forwarded_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("internal:3001"));
        assert_eq!(base_url_from_headers(&headers), "http://internal:3001");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("vacations.example.com"));
        assert_eq!(base_url_from_headers(&headers), "https://vacations.example.com");
    }

    #[test]
    fn base_url_defaults_to_localhost() {
        assert_eq!(base_url_from_headers(&HeaderMap::new()), "http://localhost");
    }
}
