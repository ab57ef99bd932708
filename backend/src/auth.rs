use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::domain::models::User;
use crate::error::ApiError;
use crate::rest::AppState;

/// An authenticated request; wraps the user resolved from the bearer token.
pub struct AuthUser(pub User);

/// An authenticated request from a staff account.
pub struct AdminUser(pub User);

/// Accepts `Bearer <token>` and the `Token <token>` prefix used by older
/// clients.
fn token_from(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            ApiError::Unauthorized("Authentication credentials were not provided.".to_string())
        })?;

    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("Token "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization header.".to_string()))
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from(parts)?;

        let user = state
            .auth
            .resolve_token(token)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Invalid token.".to_string()))?;

        Ok(Self(user))
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_staff {
            return Err(ApiError::Forbidden(
                "You do not have permission to perform this action.".to_string(),
            ));
        }

        Ok(Self(user))
    }
}
