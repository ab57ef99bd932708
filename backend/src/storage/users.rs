use chrono::Utc;
use sqlx::SqliteExecutor;

use crate::db::DbConnection;
use crate::domain::models::User;
use crate::error::ApiError;

/// Fields of a user account to be created.
pub struct NewUser<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub is_staff: bool,
}

#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: &NewUser<'_>) -> Result<User, ApiError> {
        Self::insert(self.db.pool(), new).await
    }

    /// Insert a user account, usable inside a transaction.
    pub(crate) async fn insert<'e, E>(executor: E, new: &NewUser<'_>) -> Result<User, ApiError>
    where
        E: SqliteExecutor<'e>,
    {
        let now = Utc::now();

        let id = sqlx::query(
            "INSERT INTO users (username, first_name, last_name, email, password_hash, \
             is_staff, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(new.username)
        .bind(new.first_name)
        .bind(new.last_name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.is_staff)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?
        .last_insert_rowid();

        Ok(User {
            id,
            username: new.username.to_string(),
            first_name: new.first_name.to_string(),
            last_name: new.last_name.to_string(),
            email: new.email.to_string(),
            password_hash: new.password_hash.to_string(),
            is_staff: new.is_staff,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(user)
    }

    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), ApiError> {
        sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> UserRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        UserRepository::new(db)
    }

    fn jdoe() -> NewUser<'static> {
        NewUser {
            username: "jdoe",
            first_name: "Jane Doe",
            last_name: "",
            email: "jdoe@example.com",
            password_hash: "$argon2id$fake",
            is_staff: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_username() {
        let repository = setup_test().await;

        let created = repository.create(&jdoe()).await.unwrap();
        let found = repository.find_by_username("jdoe").await.unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_constraint_violation() {
        let repository = setup_test().await;
        repository.create(&jdoe()).await.unwrap();

        let duplicate = repository.create(&jdoe()).await;

        assert!(matches!(duplicate, Err(ApiError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_update_password_replaces_the_hash() {
        let repository = setup_test().await;
        let user = repository.create(&jdoe()).await.unwrap();

        repository.update_password(user.id, "$argon2id$other").await.unwrap();

        let reloaded = repository.get(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.password_hash, "$argon2id$other");
        assert!(reloaded.updated_at >= user.updated_at);
    }
}
