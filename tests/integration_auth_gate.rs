mod common;

use axum::body::Body;
use axum::http::{HeaderValue, Request, StatusCode};
use chrono::Utc;
use common::{TestApp, jwt_config, token_for, unique_email};
use userhub_auth::create_token_with_times;
use userhub_config::JwtConfig;
use userhub_models::users::UserType;
use uuid::Uuid;

async fn list_with_header(app: &TestApp, header: Option<HeaderValue>) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder().method("GET").uri("/api/users");
    if let Some(value) = header {
        request = request.header("authorization", value);
    }
    app.send_request(request.body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn test_missing_header_is_unauthenticated() {
    let app = TestApp::new();

    let (status, body) = list_with_header(&app, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authentication token");
}

#[tokio::test]
async fn test_non_ascii_header_is_unauthenticated() {
    let app = TestApp::new();
    let value = HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap();

    let (status, body) = list_with_header(&app, Some(value)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authentication token");
}

#[tokio::test]
async fn test_malformed_headers_are_invalid_credentials() {
    let app = TestApp::new();
    let user = app.seed_user(&unique_email(), UserType::Basic, &[]).await;
    let token = token_for(user.uuid);

    for header in [
        token.clone(),
        format!("Token {token}"),
        "Bearer".to_string(),
        "Bearer not.a.jwt".to_string(),
    ] {
        let (status, body) =
            list_with_header(&app, Some(HeaderValue::from_str(&header).unwrap())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {header:?}");
        assert_eq!(body["error"], "Invalid or expired token");
    }
}

#[tokio::test]
async fn test_scheme_is_case_insensitive() {
    let app = TestApp::new();
    let user = app.seed_user(&unique_email(), UserType::Basic, &[]).await;
    let header = format!("bearer {}", token_for(user.uuid));

    let (status, _) = list_with_header(&app, Some(HeaderValue::from_str(&header).unwrap())).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_secret_and_expired_tokens_are_rejected_generically() {
    let app = TestApp::new();
    let user = app.seed_user(&unique_email(), UserType::Basic, &[]).await;

    let foreign = JwtConfig {
        secret: "some-other-secret".to_string(),
        access_token_expiry: 3600,
    };
    let wrong_secret = userhub_auth::create_access_token(user.uuid, &foreign).unwrap();

    let now = Utc::now().timestamp();
    let expired =
        create_token_with_times(user.uuid, now - 7200, now - 3600, &jwt_config()).unwrap();

    for token in [wrong_secret, expired] {
        let (status, body) = app.send("GET", "/api/users", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid or expired token");
        assert!(body.get("message").is_none());
    }
}

#[tokio::test]
async fn test_token_for_unknown_user_is_not_found() {
    let app = TestApp::new();
    let token = token_for(Uuid::new_v4());

    let (status, body) = app.send("GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_gate_runs_before_handler_validation() {
    let app = TestApp::new();
    let target = app.seed_user(&unique_email(), UserType::Basic, &[]).await;

    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/users/{}/type", target.uuid),
            None,
            Some(serde_json::json!({ "user_type": "superuser" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
