use chrono::Utc;
use sqlx::SqliteExecutor;

use crate::db::DbConnection;
use crate::domain::models::Condominium;
use crate::error::ApiError;

#[derive(Clone)]
pub struct CondominiumRepository {
    db: DbConnection,
}

impl CondominiumRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Create a condominium. Administrative path only; there is no public
    /// endpoint for this.
    pub async fn create(&self, name: &str) -> Result<Condominium, ApiError> {
        let now = Utc::now();

        let id = sqlx::query(
            "INSERT INTO condominiums (name_condominium, created_at, updated_at) VALUES (?, ?, ?)",
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(self.db.pool())
        .await?
        .last_insert_rowid();

        Ok(Condominium {
            id,
            name_condominium: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Condominium>, ApiError> {
        let condominium =
            sqlx::query_as::<_, Condominium>("SELECT * FROM condominiums WHERE id = ?")
                .bind(id)
                .fetch_optional(self.db.pool())
                .await?;

        Ok(condominium)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Condominium>, ApiError> {
        Self::find_by_name(self.db.pool(), name).await
    }

    /// Exact-name lookup, usable inside a transaction.
    pub(crate) async fn find_by_name<'e, E>(
        executor: E,
        name: &str,
    ) -> Result<Option<Condominium>, ApiError>
    where
        E: SqliteExecutor<'e>,
    {
        let condominium =
            sqlx::query_as::<_, Condominium>("SELECT * FROM condominiums WHERE name_condominium = ?")
                .bind(name)
                .fetch_optional(executor)
                .await?;

        Ok(condominium)
    }

    /// All condominiums ordered by name.
    pub async fn list(&self) -> Result<Vec<Condominium>, ApiError> {
        let condominiums =
            sqlx::query_as::<_, Condominium>("SELECT * FROM condominiums ORDER BY name_condominium")
                .fetch_all(self.db.pool())
                .await?;

        Ok(condominiums)
    }

    /// Delete a condominium; everything it owns goes with it.
    pub async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM condominiums WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
