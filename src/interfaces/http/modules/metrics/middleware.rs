//! HTTP request metrics middleware

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

/// Records `http_requests_total` (method, path, status) and
/// `http_request_duration_seconds` (method, path).
///
/// Path labels use the route template when available so ids do not
/// explode label cardinality.
pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| route_label(request.uri().path()));

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();

    metrics::counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(duration);

    response
}

/// Collapse the id segment of known resource paths.
fn route_label(path: &str) -> String {
    const TEMPLATED: [&str; 3] = [
        "/api/v1/users/",
        "/api/v1/vacations/",
        "/api/v1/calendar/feed/",
    ];
    for prefix in TEMPLATED {
        if let Some(rest) = path.strip_prefix(prefix) {
            if !rest.is_empty() && !rest.contains('/') {
                return format!("{}{{id}}", prefix);
            }
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_collapsed() {
        assert_eq!(route_label("/api/v1/vacations/abc-123"), "/api/v1/vacations/{id}");
        assert_eq!(route_label("/api/v1/calendar/feed/u-1"), "/api/v1/calendar/feed/{id}");
        assert_eq!(route_label("/api/v1/vacations"), "/api/v1/vacations");
        assert_eq!(route_label("/health"), "/health");
    }
}
