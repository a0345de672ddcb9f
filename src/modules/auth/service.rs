use tracing::instrument;

use userhub_auth::create_access_token;
use userhub_config::JwtConfig;
use userhub_core::{AppError, verify_password};
use userhub_db::UserRepository;
use userhub_models::auth::{LoginRequest, LoginResponse};
use userhub_models::users::UserProfile;

use crate::metrics::track_user_login;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(users, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login_user(
        users: &dyn UserRepository,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let invalid = || {
            track_user_login(false);
            AppError::unauthorized("Invalid email or password")
        };

        let user = users
            .find_by_email(&dto.email)
            .await
            .map_err(AppError::database)?
            .ok_or_else(invalid)?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(invalid());
        }

        let access_token = create_access_token(user.uuid, jwt_config)?;
        track_user_login(true);

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
            user: UserProfile::from(&user),
        })
    }
}
