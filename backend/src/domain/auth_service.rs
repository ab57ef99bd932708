use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use shared::{AckResponse, ChangePasswordRequest, LoginRequest, LoginResponse};
use tracing::{info, warn};

use crate::db::DbConnection;
use crate::domain::models::User;
use crate::error::ApiError;
use crate::storage::{NewUser, TokenRepository, UserRepository};

const MIN_PASSWORD_LEN: usize = 8;

/// Hash a plaintext password into an argon2 PHC string.
pub(crate) fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to hash password: {e}")))?;

    Ok(hash.to_string())
}

pub(crate) fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub(crate) fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters."
        )));
    }

    Ok(())
}

/// Credential checks and token issuance.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    tokens: TokenRepository,
}

impl AuthService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            tokens: TokenRepository::new(db),
        }
    }

    /// Exchange credentials for the user's persistent token. Repeated
    /// logins return the same token until it is revoked.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        info!("Login attempt for username: {}", request.username);

        validate_password(&request.password)?;

        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash) {
            warn!("Invalid credentials for username: {}", request.username);
            return Err(ApiError::InvalidCredentials);
        }

        let token = self.tokens.get_or_create(user.id).await?;

        Ok(LoginResponse {
            token,
            user: user.summary(),
        })
    }

    /// Resolve a presented bearer token to its user.
    pub async fn resolve_token(&self, token: &str) -> Result<Option<User>, ApiError> {
        self.tokens.find_user(token).await
    }

    /// Replace a user's password after verifying the old one. Only the
    /// account owner or staff may do this.
    pub async fn change_password(
        &self,
        caller: &User,
        target_id: i64,
        request: &ChangePasswordRequest,
    ) -> Result<AckResponse, ApiError> {
        if caller.id != target_id && !caller.is_staff {
            return Err(ApiError::Forbidden(
                "You do not have permission to perform this action.".to_string(),
            ));
        }

        let user = self
            .users
            .get(target_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User not found: {target_id}")))?;

        if !verify_password(&request.old_password, &user.password_hash) {
            return Err(ApiError::InvalidCredentials);
        }

        validate_password(&request.new_password)?;

        let password_hash = hash_password(&request.new_password)?;
        self.users.update_password(user.id, &password_hash).await?;

        info!("Password updated for user: {}", user.username);

        Ok(AckResponse {
            message: "Password updated successfully".to_string(),
        })
    }

    /// Ensure the staff account exists; used by the startup seed.
    pub async fn ensure_admin(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<(), ApiError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Ok(());
        }

        validate_password(password)?;
        let password_hash = hash_password(password)?;

        self.users
            .create(&NewUser {
                username,
                first_name: "",
                last_name: "",
                email,
                password_hash: &password_hash,
                is_staff: true,
            })
            .await?;

        info!("Seeded staff account: {}", username);

        Ok(())
    }
}
