//! HS256 access token utilities.
//!
//! Tokens carry only the user's `uuid` plus `iat`/`exp`. Verification always
//! requires and enforces `exp`.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use userhub_config::JwtConfig;
use userhub_core::AppError;

use crate::claims::Claims;

/// Creates an access token for `uuid` that expires after the configured lifetime.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(uuid: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    create_token_with_times(uuid, now, now + jwt_config.access_token_expiry, jwt_config)
}

/// Creates a token with explicit `iat` and `exp` timestamps.
pub fn create_token_with_times(
    uuid: Uuid,
    iat: i64,
    exp: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let claims = Claims {
        uuid,
        iat: iat.max(0) as usize,
        exp: exp.max(0) as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(AppError::internal)
}

/// Verifies signature and expiry and returns the embedded claims.
///
/// Every failure maps to the same 401 so clients cannot tell a bad signature
/// from an expired token. The cause is logged at debug level.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Token verification failed");
        AppError::unauthorized("Invalid or expired token")
    })
}
