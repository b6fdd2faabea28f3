//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::middleware::{admin_guard, auth_middleware, AuthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{auth, calendar, health, users, vacations};
use crate::application::{CalendarService, UserService, VacationService};
use crate::infrastructure::Repositories;

/// Unified router state. Each handler module extracts its own slice via
/// `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub vacations: VacationService,
    pub calendar: CalendarService,
    pub repos: Repositories,
    pub public_url: Option<String>,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(repos: Repositories, users: UserService, public_url: Option<String>) -> Self {
        Self {
            vacations: VacationService::new(repos.vacations.clone()),
            calendar: CalendarService::new(repos.vacations.clone()),
            users,
            repos,
            public_url,
            started_at: Arc::new(Instant::now()),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        AuthState {
            users: s.users.clone(),
        }
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            users: s.users.clone(),
        }
    }
}

impl FromRef<AppState> for users::UserHandlerState {
    fn from_ref(s: &AppState) -> Self {
        users::UserHandlerState {
            users: s.users.clone(),
        }
    }
}

impl FromRef<AppState> for vacations::VacationHandlerState {
    fn from_ref(s: &AppState) -> Self {
        vacations::VacationHandlerState {
            vacations: s.vacations.clone(),
        }
    }
}

impl FromRef<AppState> for calendar::CalendarHandlerState {
    fn from_ref(s: &AppState) -> Self {
        calendar::CalendarHandlerState {
            calendar: s.calendar.clone(),
            public_url: s.public_url.clone(),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            repos: s.repos.clone(),
            started_at: s.started_at.clone(),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::profile,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        vacations::list_vacations,
        vacations::get_vacation,
        vacations::create_vacation,
        vacations::update_vacation,
        vacations::delete_vacation,
        calendar::personal_feed,
        calendar::team_feed,
        calendar::feed_urls,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            vacations::VacationDto,
            vacations::CreateVacationRequest,
            vacations::UpdateVacationRequest,
            calendar::FeedUrlsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Authentication", description = "Login (JWT) and current user profile"),
        (name = "Users", description = "User management, administrators only"),
        (name = "Vacations", description = "Vacation requests and the approval workflow"),
        (name = "Calendar", description = "iCalendar feeds of approved vacation requests"),
    ),
    info(
        title = "Vacation Tracker API",
        version = "1.0.0",
        description = "REST API for submitting, approving and subscribing to vacation requests",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is mounted only when a Prometheus handle is supplied.
pub fn create_api_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let auth_state = AuthState::from_ref(&state);

    let public_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/calendar/feed/{user_id}", get(calendar::personal_feed))
        .route("/calendar/team-feed", get(calendar::team_feed));

    let admin_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route_layer(middleware::from_fn(admin_guard));

    let protected_routes = Router::new()
        .route("/auth/profile", get(auth::profile))
        .route(
            "/vacations",
            get(vacations::list_vacations).post(vacations::create_vacation),
        )
        .route(
            "/vacations/{id}",
            get(vacations::get_vacation)
                .put(vacations::update_vacation)
                .delete(vacations::delete_vacation),
        )
        .route("/calendar/urls", get(calendar::feed_urls))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let api = public_routes.merge(protected_routes);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()));

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::DefaultAdmin;
    use crate::infrastructure::crypto::jwt::JwtConfig;
    use axum::body::Body;
    use axum::http::{header, Request, Response, StatusCode};
    use serde_json::{json, Value};
    use tower::Service;

    struct TestApp {
        router: Router,
    }

    impl TestApp {
        async fn new() -> Self {
            let repos = Repositories::in_memory();
            let jwt = JwtConfig {
                secret: "router-test-secret".into(),
                expiration_hours: 1,
                issuer: "vacation-tracker".into(),
            };
            let users = UserService::new(repos.users.clone(), jwt, crate::infrastructure::crypto::password::MIN_COST);
            users
                .ensure_default_admin(&DefaultAdmin::default())
                .await
                .unwrap();
            let state = AppState::new(repos, users, None);
            Self {
                router: create_api_router(state, None),
            }
        }

        async fn send(&self, req: Request<Body>) -> Response<Body> {
            let mut svc = self.router.clone().into_service();
            svc.call(req).await.unwrap()
        }

        async fn call(
            &self,
            method: &str,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            let req = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            let resp = self.send(req).await;
            let status = resp.status();
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or(Value::Null)
            };
            (status, value)
        }

        async fn login(&self, email: &str, password: &str) -> String {
            let (status, body) = self
                .call(
                    "POST",
                    "/api/v1/auth/login",
                    None,
                    Some(json!({"email": email, "password": password})),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "{body}");
            body["data"]["token"].as_str().unwrap().to_string()
        }

        async fn admin_token(&self) -> String {
            self.login("admin@company.com", "admin123").await
        }
    }

    #[tokio::test]
    async fn bob_scenario_over_http() {
        let app = TestApp::new().await;
        let admin = app.admin_token().await;

        let (status, body) = app
            .call(
                "POST",
                "/api/v1/users",
                Some(&admin),
                Some(json!({"email": "bob@x.com", "name": "Bob", "password": "secret1"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["role"], "user");
        assert_eq!(body["data"]["is_active"], true);
        assert!(body["data"].get("password_hash").is_none());
        let bob_id = body["data"]["id"].as_str().unwrap().to_string();

        let bob = app.login("bob@x.com", "secret1").await;

        let (status, body) = app
            .call(
                "POST",
                "/api/v1/vacations",
                Some(&bob),
                Some(json!({"title": "Trip", "startDate": "2024-06-01", "endDate": "2024-06-10"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["status"], "pending");
        assert_eq!(body["data"]["user_id"], bob_id.as_str());
        let vacation_id = body["data"]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/v1/vacations/{}", vacation_id);

        let (status, body) = app
            .call("PUT", &uri, Some(&admin), Some(json!({"status": "approved"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "approved");

        let (status, body) = app
            .call("PUT", &uri, Some(&bob), Some(json!({"status": "rejected"})))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Only administrators can change vacation status");

        let (status, body) = app.call("GET", &uri, Some(&bob), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "approved");
    }

    #[tokio::test]
    async fn missing_or_bad_token_is_401() {
        let app = TestApp::new().await;
        let (status, body) = app.call("GET", "/api/v1/vacations", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);

        let (status, _) = app.call("GET", "/api/v1/vacations", Some("nope"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn user_routes_require_admin_before_body_parsing() {
        let app = TestApp::new().await;
        let admin = app.admin_token().await;
        app.call(
            "POST",
            "/api/v1/users",
            Some(&admin),
            Some(json!({"email": "bob@x.com", "name": "Bob", "password": "secret1"})),
        )
        .await;
        let bob = app.login("bob@x.com", "secret1").await;

        let (status, body) = app
            .call("POST", "/api/v1/users", Some(&bob), Some(json!({"garbage": true})))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Admin access required");

        let (status, _) = app.call("GET", "/api/v1/users", Some(&bob), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn default_admin_delete_is_403_and_duplicate_email_is_409() {
        let app = TestApp::new().await;
        let admin = app.admin_token().await;

        let (_, body) = app.call("GET", "/api/v1/auth/profile", Some(&admin), None).await;
        let admin_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, _) = app
            .call("DELETE", &format!("/api/v1/users/{}", admin_id), Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let new_user = json!({"email": "a@x.com", "name": "Ann", "password": "secret1"});
        let (status, _) = app.call("POST", "/api/v1/users", Some(&admin), Some(new_user)).await;
        assert_eq!(status, StatusCode::CREATED);

        let dup = json!({"email": "A@X.com", "name": "Ann", "password": "secret1"});
        let (status, _) = app.call("POST", "/api/v1/users", Some(&admin), Some(dup)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = app
            .call("DELETE", "/api/v1/users/missing", Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn schema_violations_are_400() {
        let app = TestApp::new().await;
        let admin = app.admin_token().await;

        let (status, _) = app
            .call(
                "POST",
                "/api/v1/vacations",
                Some(&admin),
                Some(json!({"title": "Trip", "start_date": "2024-06-10", "end_date": "2024-06-01"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .call(
                "POST",
                "/api/v1/vacations",
                Some(&admin),
                Some(json!({"title": "Trip", "start_date": "2024-06-01", "end_date": "2024-06-02", "type": "holiday"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .call(
                "POST",
                "/api/v1/auth/login",
                None,
                Some(json!({"email": "admin@company.com", "password": "123"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn owner_payload_with_null_status_is_rejected_whole() {
        let app = TestApp::new().await;
        let admin = app.admin_token().await;
        app.call(
            "POST",
            "/api/v1/users",
            Some(&admin),
            Some(json!({"email": "bob@x.com", "name": "Bob", "password": "secret1"})),
        )
        .await;
        let bob = app.login("bob@x.com", "secret1").await;

        let (_, body) = app
            .call(
                "POST",
                "/api/v1/vacations",
                Some(&bob),
                Some(json!({"title": "Trip", "start_date": "2024-06-01", "end_date": "2024-06-10"})),
            )
            .await;
        let uri = format!("/api/v1/vacations/{}", body["data"]["id"].as_str().unwrap());

        let (status, body) = app
            .call("PUT", &uri, Some(&bob), Some(json!({"title": "Changed", "status": null})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = app
            .call(
                "POST",
                "/api/v1/vacations",
                Some(&bob),
                Some(json!({"title": "Other", "start_date": "2024-07-01", "end_date": "2024-07-02", "status": null})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = app.call("GET", &uri, Some(&bob), None).await;
        assert_eq!(body["data"]["title"], "Trip");
        assert_eq!(body["data"]["status"], "pending");
    }

    #[tokio::test]
    async fn deactivated_user_is_locked_out() {
        let app = TestApp::new().await;
        let admin = app.admin_token().await;
        let (_, body) = app
            .call(
                "POST",
                "/api/v1/users",
                Some(&admin),
                Some(json!({"email": "bob@x.com", "name": "Bob", "password": "secret1"})),
            )
            .await;
        let bob_id = body["data"]["id"].as_str().unwrap().to_string();
        let bob = app.login("bob@x.com", "secret1").await;

        let (status, _) = app
            .call(
                "PUT",
                &format!("/api/v1/users/{}", bob_id),
                Some(&admin),
                Some(json!({"active": false})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app.call("GET", "/api/v1/vacations", Some(&bob), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .call(
                "POST",
                "/api/v1/auth/login",
                None,
                Some(json!({"email": "bob@x.com", "password": "secret1"})),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn calendar_feeds_are_public_and_urls_are_not() {
        let app = TestApp::new().await;
        let admin = app.admin_token().await;

        let (_, body) = app
            .call(
                "POST",
                "/api/v1/vacations",
                Some(&admin),
                Some(json!({"title": "Offsite", "start_date": "2024-07-01", "end_date": "2024-07-02"})),
            )
            .await;
        let id = body["data"]["id"].as_str().unwrap().to_string();
        let owner = body["data"]["user_id"].as_str().unwrap().to_string();
        app.call(
            "PUT",
            &format!("/api/v1/vacations/{}", id),
            Some(&admin),
            Some(json!({"status": "approved"})),
        )
        .await;

        let req = Request::builder()
            .uri("/api/v1/calendar/team-feed")
            .body(Body::empty())
            .unwrap();
        let resp = app.send(req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/calendar"));
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let ics = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(ics.contains("System Administrator - Offsite"));

        let (status, _) = app.call("GET", "/api/v1/calendar/urls", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let req = Request::builder()
            .uri("/api/v1/calendar/urls")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .header(header::HOST, "vacations.local")
            .body(Body::empty())
            .unwrap();
        let resp = app.send(req).await;
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["data"]["personal_feed"],
            format!("http://vacations.local/api/v1/calendar/feed/{}", owner)
        );
    }

    #[tokio::test]
    async fn health_reports_memory_backend_and_request_id() {
        let app = TestApp::new().await;
        let req = Request::builder()
            .uri("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let resp = app.send(req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["x-request-id"], "abc-123");

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"]["backend"], "memory");
    }
}
