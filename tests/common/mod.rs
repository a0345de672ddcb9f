#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use userhub::router::init_router;
use userhub::state::AppState;
use userhub_auth::create_access_token;
use userhub_config::{CorsConfig, JwtConfig, RateLimitConfig, RegistrationConfig, RoleDefaults};
use userhub_core::{hash_password, permissions};
use userhub_db::{InMemoryUserRepository, UserRepository};
use userhub_models::users::{NewUser, User, UserType};

pub const REGISTER_TOKEN: &str = "test-register-secret";
pub const JWT_SECRET: &str = "test-jwt-secret";

pub struct TestApp {
    pub repo: Arc<InMemoryUserRepository>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_register_token(Some(REGISTER_TOKEN))
    }

    pub fn with_register_token(token: Option<&str>) -> Self {
        let repo = Arc::new(InMemoryUserRepository::new());
        let state = AppState {
            users: repo.clone(),
            jwt_config: jwt_config(),
            registration_config: RegistrationConfig {
                register_token: token.map(str::to_string),
                role_defaults: RoleDefaults {
                    admin: vec!["admin".to_string(), "users:manage".to_string()],
                    founder: vec!["founder".to_string()],
                },
            },
            cors_config: CorsConfig {
                allowed_origins: vec!["http://localhost:5173".to_string()],
            },
            rate_limit_config: RateLimitConfig::disabled(),
        };
        Self { repo, state }
    }

    pub fn router(&self) -> Router {
        init_router(self.state.clone())
    }

    /// Inserts a user with a placeholder password hash.
    pub async fn seed_user(&self, email: &str, user_type: UserType, perms: &[&str]) -> User {
        self.insert(email, "not-a-bcrypt-hash".to_string(), user_type, perms)
            .await
    }

    /// Inserts a user whose password can be used to log in.
    pub async fn seed_user_with_password(&self, email: &str, password: &str) -> User {
        let hash = hash_password(password).unwrap();
        self.insert(email, hash, UserType::Basic, &[]).await
    }

    async fn insert(&self, email: &str, hash: String, user_type: UserType, perms: &[&str]) -> User {
        let perms: Vec<String> = perms.iter().map(|p| p.to_string()).collect();
        self.repo
            .insert(NewUser {
                uuid: Uuid::new_v4(),
                name: "Test User".to_string(),
                email: email.to_string(),
                password_hash: hash,
                cidade: Some("Recife".to_string()),
                estado: Some("PE".to_string()),
                linkedin: None,
                discord: None,
                user_type,
                permissions: permissions::encode(&perms),
            })
            .await
            .unwrap()
    }

    pub async fn stored(&self, uuid: Uuid) -> Option<User> {
        self.repo.find_by_uuid(uuid).await.unwrap()
    }

    /// Sends one request through a fresh router and returns status and JSON body.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: JWT_SECRET.to_string(),
        access_token_expiry: 3600,
    }
}

pub fn token_for(uuid: Uuid) -> String {
    create_access_token(uuid, &jwt_config()).unwrap()
}

pub fn unique_email() -> String {
    format!("user-{}@example.com", Uuid::new_v4())
}
