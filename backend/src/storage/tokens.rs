use chrono::Utc;
use uuid::Uuid;

use crate::db::DbConnection;
use crate::domain::models::User;
use crate::error::ApiError;

/// Explicit `user_id -> token` mapping table. One persistent token per
/// user; repeated logins reuse it.
#[derive(Clone)]
pub struct TokenRepository {
    db: DbConnection,
}

impl TokenRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Issue or reuse the opaque token for a user.
    pub async fn get_or_create(&self, user_id: i64) -> Result<String, ApiError> {
        let existing =
            sqlx::query_scalar::<_, String>("SELECT token FROM auth_tokens WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(self.db.pool())
                .await?;

        if let Some(token) = existing {
            return Ok(token);
        }

        let token = Uuid::new_v4().simple().to_string();

        sqlx::query("INSERT INTO auth_tokens (user_id, token, created_at) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(&token)
            .bind(Utc::now())
            .execute(self.db.pool())
            .await?;

        Ok(token)
    }

    /// Resolve a presented token to its user.
    pub async fn find_user(&self, token: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT users.* FROM users \
             JOIN auth_tokens ON auth_tokens.user_id = users.id \
             WHERE auth_tokens.token = ?",
        )
        .bind(token)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(user)
    }

    /// Drop a user's token, forcing the next login to issue a fresh one.
    pub async fn revoke(&self, user_id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE user_id = ?")
            .bind(user_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
