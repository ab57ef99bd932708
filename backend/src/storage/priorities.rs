use chrono::Utc;
use shared::NewPriorityItem;
use sqlx::SqliteExecutor;

use crate::db::DbConnection;
use crate::domain::models::PriorityItem;
use crate::error::ApiError;

#[derive(Clone)]
pub struct PriorityRepository {
    db: DbConnection,
}

impl PriorityRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert one priority item, usable inside a transaction.
    pub(crate) async fn insert<'e, E>(
        executor: E,
        condominium_id: i64,
        item: &NewPriorityItem,
    ) -> Result<PriorityItem, ApiError>
    where
        E: SqliteExecutor<'e>,
    {
        let now = Utc::now();

        let id = sqlx::query(
            "INSERT INTO priority_items (condominium_id, name, detail, priority, upgrade, \
             status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(condominium_id)
        .bind(&item.name)
        .bind(&item.detail)
        .bind(item.priority)
        .bind(item.upgrade)
        .bind(item.status.as_str())
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?
        .last_insert_rowid();

        Ok(PriorityItem {
            id,
            condominium_id,
            name: item.name.clone(),
            detail: item.detail.clone(),
            priority: item.priority,
            upgrade: item.upgrade,
            status: item.status,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<PriorityItem>, ApiError> {
        let item = sqlx::query_as::<_, PriorityItem>("SELECT * FROM priority_items WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(item)
    }

    /// Items of one condominium, in insertion order.
    pub async fn list_for_condominium(
        &self,
        condominium_id: i64,
    ) -> Result<Vec<PriorityItem>, ApiError> {
        let items = sqlx::query_as::<_, PriorityItem>(
            "SELECT * FROM priority_items WHERE condominium_id = ? ORDER BY id",
        )
        .bind(condominium_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(items)
    }
}
