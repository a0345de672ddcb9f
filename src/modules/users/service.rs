use tracing::instrument;
use uuid::Uuid;

use userhub_config::{RegistrationConfig, RoleDefaults};
use userhub_core::{AppError, hash_password, permissions};
use userhub_db::{RepositoryError, UserRepository};
use userhub_models::users::{
    NewUser, RegisterUserDto, UpdatePermissionsDto, UpdateProfileDto, User, UserProfile,
    UserSummary, UserType,
};

use crate::metrics::{track_role_change, track_user_deleted, track_user_registered};
use crate::middleware::policy::{UserAction, authorize};
use crate::validator::{body_error, validate};

pub struct UserService;

/// Parses a path segment as a user uuid.
pub fn parse_user_uuid(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::bad_request("Invalid user id"))
}

fn write_error(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::Conflict(_) => AppError::conflict("Email already in use"),
        other => AppError::database(other),
    }
}

impl UserService {
    #[instrument(skip(users))]
    pub async fn list(users: &dyn UserRepository) -> Result<Vec<UserSummary>, AppError> {
        let records = users.list().await.map_err(AppError::database)?;
        Ok(records.iter().map(UserSummary::from).collect())
    }

    #[instrument(skip(users))]
    pub async fn find(users: &dyn UserRepository, uuid: Uuid) -> Result<User, AppError> {
        users
            .find_by_uuid(uuid)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    async fn save(users: &dyn UserRepository, user: &User) -> Result<User, AppError> {
        users
            .update(user)
            .await
            .map_err(write_error)?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Checks the registration secret on the raw body, then parses and
    /// validates the profile.
    ///
    /// The secret is checked before anything else, so a request with the
    /// wrong secret is a 403 no matter what else it contains.
    pub fn parse_registration(
        config: &RegistrationConfig,
        body: &[u8],
    ) -> Result<RegisterUserDto, AppError> {
        let raw: Option<serde_json::Value> = serde_json::from_slice(body).ok();
        let presented = raw
            .as_ref()
            .and_then(|value| value.get("register_token"))
            .and_then(|token| token.as_str());

        if !presented.is_some_and(|token| config.token_matches(token)) {
            return Err(AppError::forbidden("Invalid registration token"));
        }

        let raw = raw.ok_or_else(|| AppError::bad_request("Invalid request body"))?;
        let dto: RegisterUserDto =
            serde_json::from_value(raw).map_err(|e| body_error(&e.to_string()))?;
        validate(&dto)?;
        Ok(dto)
    }

    /// Creates a `basic` user with no permissions.
    #[instrument(skip(users, dto), fields(email = %dto.email))]
    pub async fn register(users: &dyn UserRepository, dto: RegisterUserDto) -> Result<User, AppError> {
        let password_hash = hash_password(&dto.password).map_err(|e| {
            AppError::internal_with_message("Could not complete registration", e.error)
        })?;

        let new_user = NewUser {
            uuid: Uuid::new_v4(),
            name: dto.name.trim().to_string(),
            email: dto.email,
            password_hash,
            cidade: dto.cidade,
            estado: dto.estado,
            linkedin: dto.linkedin,
            discord: dto.discord,
            user_type: UserType::Basic,
            permissions: permissions::encode(&[]),
        };

        let user = users.insert(new_user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AppError::conflict("Email already registered"),
            other => AppError::internal_with_message("Could not complete registration", other),
        })?;

        track_user_registered();
        tracing::info!(user_uuid = %user.uuid, "User registered");
        Ok(user)
    }

    #[instrument(skip(users, caller, dto), fields(caller = %caller.uuid))]
    pub async fn update_profile(
        users: &dyn UserRepository,
        caller: &User,
        target: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<UserProfile, AppError> {
        let mut user = Self::find(users, target).await?;
        authorize(caller, UserAction::UpdateProfile { target: user.uuid })?;
        validate(&dto)?;

        if let Some(email) = dto.email {
            user.email = email;
        }
        if let Some(name) = dto.name {
            user.name = name;
        }
        if dto.cidade.is_some() {
            user.cidade = dto.cidade;
        }
        if dto.estado.is_some() {
            user.estado = dto.estado;
        }
        if dto.linkedin.is_some() {
            user.linkedin = dto.linkedin;
        }
        if dto.discord.is_some() {
            user.discord = dto.discord;
        }
        if let Some(password) = dto.password.filter(|p| !p.is_empty()) {
            user.password = hash_password(&password)?;
        }

        let saved = Self::save(users, &user).await?;
        Ok(UserProfile::from(&saved))
    }

    /// Sets the role tag. Promotion to `founder` or `admin` replaces the
    /// permission list with that role's configured defaults.
    #[instrument(skip(users, caller, defaults), fields(caller = %caller.uuid))]
    pub async fn change_user_type(
        users: &dyn UserRepository,
        caller: &User,
        target: Uuid,
        user_type: UserType,
        defaults: &RoleDefaults,
    ) -> Result<UserProfile, AppError> {
        let mut user = Self::find(users, target).await?;
        authorize(caller, UserAction::ChangeRole)?;

        user.user_type = user_type;
        match user_type {
            UserType::Admin => user.permissions = permissions::encode(&defaults.admin),
            UserType::Founder => user.permissions = permissions::encode(&defaults.founder),
            UserType::Basic => {}
        }

        let saved = Self::save(users, &user).await?;
        track_role_change(user_type.as_str());
        tracing::info!(target_uuid = %saved.uuid, user_type = %user_type, "User type changed");
        Ok(UserProfile::from(&saved))
    }

    /// Deletes the caller's own account. `raw_target` is the unparsed path segment.
    #[instrument(skip(users, caller), fields(caller = %caller.uuid))]
    pub async fn delete(
        users: &dyn UserRepository,
        caller: &User,
        raw_target: &str,
    ) -> Result<(), AppError> {
        let target = Uuid::parse_str(raw_target.trim()).ok();
        authorize(caller, UserAction::Delete { target })?;

        let user = Self::find(users, caller.uuid).await?;
        if !users
            .delete_by_uuid(user.uuid)
            .await
            .map_err(AppError::database)?
        {
            return Err(AppError::not_found("User not found"));
        }

        track_user_deleted();
        tracing::info!(user_uuid = %user.uuid, "User deleted");
        Ok(())
    }

    /// Replaces the target's permission list. Allowed only while the
    /// target's current list holds `admin`.
    #[instrument(skip(users, caller, dto), fields(caller = %caller.uuid))]
    pub async fn update_permissions(
        users: &dyn UserRepository,
        caller: &User,
        target: Uuid,
        dto: UpdatePermissionsDto,
    ) -> Result<UserProfile, AppError> {
        let mut user = Self::find(users, target).await?;

        let current = permissions::decode(&user.permissions).map_err(|e| {
            tracing::warn!(user_uuid = %user.uuid, error = %e, "Stored permissions do not decode");
            AppError::bad_request("Stored permissions are invalid")
        })?;

        authorize(
            caller,
            UserAction::UpdatePermissions {
                target_permissions: &current,
            },
        )?;
        validate(&dto)?;

        let tokens: Vec<String> = dto
            .permission
            .iter()
            .map(|t| t.trim().to_string())
            .collect();
        user.permissions = permissions::encode(&tokens);

        let saved = Self::save(users, &user).await?;
        tracing::info!(target_uuid = %saved.uuid, count = tokens.len(), "Permissions updated");
        Ok(UserProfile::from(&saved))
    }
}
