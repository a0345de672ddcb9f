mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{REGISTER_TOKEN, TestApp};
use serde_json::json;
use userhub_core::permissions;
use userhub_db::UserRepository;
use userhub_models::users::UserType;

fn registration(email: &str) -> serde_json::Value {
    json!({
        "name": "Ana Souza",
        "email": email,
        "password": "password123",
        "cidade": "Recife",
        "estado": "PE",
        "linkedin": "https://linkedin.com/in/ana",
        "register_token": REGISTER_TOKEN,
    })
}

#[tokio::test]
async fn test_register_creates_basic_user() {
    let app = TestApp::new();

    let (status, body) = app
        .send("POST", "/api/users", None, Some(registration("ana@example.com")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");

    let user = app
        .repo
        .find_by_email("ana@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.user_type, UserType::Basic);
    assert_eq!(user.cidade.as_deref(), Some("Recife"));
    assert_eq!(user.discord, None);
    assert_eq!(permissions::decode(&user.permissions).unwrap(), Vec::<String>::new());
    assert_ne!(user.password, "password123");
    assert!(userhub_core::verify_password("password123", &user.password).unwrap());
}

#[tokio::test]
async fn test_wrong_token_is_forbidden_regardless_of_payload() {
    let app = TestApp::new();

    let mut wrong = registration("ana@example.com");
    wrong["register_token"] = json!("guess");

    let payloads = [
        wrong,
        json!({ "register_token": "guess" }),
        json!({ "name": "x" }),
        json!({ "register_token": 42, "email": "not-an-email" }),
    ];

    for payload in payloads {
        let (status, body) = app.send("POST", "/api/users", None, Some(payload)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Invalid registration token");
    }

    assert!(app.repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_forbidden() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from("register_token=test-register-secret"))
        .unwrap();

    let (status, _) = app.send_request(request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_registration_disabled_without_configured_token() {
    let app = TestApp::with_register_token(None);

    let mut payload = registration("ana@example.com");
    payload["register_token"] = json!("");

    let (status, _) = app.send("POST", "/api/users", None, Some(payload)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_profile_field_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            "POST",
            "/api/users",
            None,
            Some(json!({ "register_token": REGISTER_TOKEN, "email": "a@example.com", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name is required");
}

#[tokio::test]
async fn test_invalid_profile_is_unprocessable() {
    let app = TestApp::new();

    let mut payload = registration("not-an-email");
    payload["password"] = json!("short");

    let (status, _) = app.send("POST", "/api/users", None, Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = TestApp::new();

    let (status, _) = app
        .send("POST", "/api/users", None, Some(registration("dup@example.com")))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send("POST", "/api/users", None, Some(registration("dup@example.com")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already registered");
    assert_eq!(app.repo.list().await.unwrap().len(), 1);
}
