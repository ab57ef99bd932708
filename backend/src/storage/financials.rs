use chrono::Utc;
use shared::NewFinancialEntry;
use sqlx::SqliteExecutor;

use crate::db::DbConnection;
use crate::domain::models::FinancialStat;
use crate::error::ApiError;

#[derive(Clone)]
pub struct FinancialRepository {
    db: DbConnection,
}

impl FinancialRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert one financial entry, usable inside a transaction.
    pub(crate) async fn insert<'e, E>(
        executor: E,
        condominium_id: i64,
        entry: &NewFinancialEntry,
    ) -> Result<FinancialStat, ApiError>
    where
        E: SqliteExecutor<'e>,
    {
        let now = Utc::now();

        let id = sqlx::query(
            "INSERT INTO financial_stats (condominium_id, type_detail, income, expenses, \
             details, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(condominium_id)
        .bind(&entry.type_detail)
        .bind(entry.income)
        .bind(entry.expenses)
        .bind(&entry.details)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?
        .last_insert_rowid();

        Ok(FinancialStat {
            id,
            condominium_id,
            type_detail: entry.type_detail.clone(),
            income: entry.income,
            expenses: entry.expenses,
            details: entry.details.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Entries of one condominium, in insertion order.
    pub async fn list_for_condominium(
        &self,
        condominium_id: i64,
    ) -> Result<Vec<FinancialStat>, ApiError> {
        let entries = sqlx::query_as::<_, FinancialStat>(
            "SELECT * FROM financial_stats WHERE condominium_id = ? ORDER BY id",
        )
        .bind(condominium_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(entries)
    }
}
