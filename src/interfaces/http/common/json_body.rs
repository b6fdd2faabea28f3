//! JSON body extractor for Axum
//!
//! `JsonBody<T>` works like `axum::Json<T>`, but every rejection (bad
//! syntax, missing field, wrong type, unknown enum value, wrong content
//! type) becomes a 400 in the standard envelope. Field constraints are
//! checked by the services, after any role guard.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;

use super::ApiResponse;

pub struct JsonBody<T>(pub T);

/// Error type for `JsonBody` extraction failures.
pub struct JsonBodyRejection(JsonRejection);

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::error(format!("Invalid request body: {}", self.0.body_text()));
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(JsonBodyRejection)?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "lowercase")]
    enum Kind {
        Sick,
    }

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct TestBody {
        name: String,
        kind: Option<Kind>,
    }

    async fn handler(JsonBody(_body): JsonBody<TestBody>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new().route("/test", post(handler))
    }

    async fn send(body: &str) -> axum::http::Response<Body> {
        use tower::Service;
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let resp = send(r#"{"name": "Alice", "kind": "sick"}"#).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        assert_eq!(send("not json").await.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_field_returns_400() {
        assert_eq!(send(r#"{"kind": "sick"}"#).await.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_enum_value_returns_400() {
        let resp = send(r#"{"name": "Alice", "kind": "holiday"}"#).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
