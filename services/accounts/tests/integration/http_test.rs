//! Router-level checks for paths that answer before touching the database.

use axum::Router;
use axum::body::{Body, to_bytes};
use chrono::Duration;
use http::{Request, StatusCode, header};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;
use uuid::Uuid;

use roster_accounts::router::build_router;
use roster_accounts::state::AppState;
use roster_auth_types::cookie::{ROSTER_USER_SESSION, SESSION_TOKEN_EXP};
use roster_auth_types::session::SessionSecret;
use roster_auth_types::token::{Principal, issue_session_token};
use roster_core::middleware::X_REQUEST_ID;
use roster_domain::messages::MessageCatalog;
use roster_testing::session::{MockSession, TEST_SESSION_SECRET};

fn app() -> Router {
    build_router(AppState {
        db: DatabaseConnection::Disconnected,
        session_secret: SessionSecret::new(TEST_SESSION_SECRET),
        cookie_domain: "example.com".to_owned(),
        catalog: MessageCatalog::default(),
        confirmation_ttl: Duration::hours(72),
        reset_password_ttl: Duration::hours(6),
    })
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn should_answer_liveness_with_request_id() {
    let resp = app().oneshot(get("/healthz")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(X_REQUEST_ID));
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let resp = app().oneshot(get("/readyz")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_require_user_session_for_profile() {
    let resp = app().oneshot(get("/users/profile")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_not_read_admin_cookie_as_user_session() {
    let (name, value) = MockSession::admin(Uuid::now_v7()).header();
    let req = Request::get("/users/profile")
        .header(name, value)
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_forbid_admin_token_in_user_cookie() {
    let (token, _) = issue_session_token(
        Principal::Admin,
        Uuid::now_v7(),
        TEST_SESSION_SECRET,
        SESSION_TOKEN_EXP,
    )
    .unwrap();
    let req = Request::get("/users/dash_boards")
        .header(header::COOKIE, format!("{ROSTER_USER_SESSION}={token}"))
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_require_admin_session_for_admin_me() {
    let (name, value) = MockSession::user(Uuid::now_v7()).header();
    let req = Request::get("/admin_user/me")
        .header(name, value)
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_clear_user_cookie_on_sign_out() {
    let req = Request::delete("/users/sign_out")
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let set_cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with(&format!("{ROSTER_USER_SESSION}=")));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn should_reject_empty_confirmation_token() {
    let resp = app()
        .oneshot(get("/users/confirmation?confirmation_token="))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["kind"], "INVALID_CONFIRMATION_TOKEN");
}

#[tokio::test]
async fn should_reject_empty_reset_token() {
    let req = Request::put("/users/password")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"reset_password_token":"","password":"aaaaAAAA1111"}"#))
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["kind"], "INVALID_RESET_TOKEN");
}

#[tokio::test]
async fn should_render_unresolvable_gender_as_field_violation() {
    for gender in ["true", "1.5", "[1]", "99999999999999999999", "\"robot\""] {
        let body = format!(r#"{{"name":"alice","password":"aaaaAAAA1111","gender":{gender}}}"#);
        let req = Request::post("/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{gender}");
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "application/json",
            "{gender}"
        );

        let json = body_json(resp).await;
        assert_eq!(json["kind"], "VALIDATION_FAILED", "{gender}");
        assert!(json["errors"]["gender"].is_array(), "{gender}");
        assert!(json["errors"]["email"].is_array(), "{gender}");
    }
}
