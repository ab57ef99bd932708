use chrono::Utc;
use sqlx::SqliteExecutor;

use crate::db::DbConnection;
use crate::domain::models::Department;
use crate::error::ApiError;

/// Fields of a department to be created under a condominium.
pub struct NewDepartment<'a> {
    pub condominium_id: i64,
    pub department_number: i64,
    pub department_block: i64,
    pub number_habitants: i64,
    pub department_owner: &'a str,
}

#[derive(Clone)]
pub struct DepartmentRepository {
    db: DbConnection,
}

impl DepartmentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: &NewDepartment<'_>) -> Result<Department, ApiError> {
        Self::insert(self.db.pool(), new).await
    }

    /// Insert a department, usable inside a transaction.
    pub(crate) async fn insert<'e, E>(
        executor: E,
        new: &NewDepartment<'_>,
    ) -> Result<Department, ApiError>
    where
        E: SqliteExecutor<'e>,
    {
        let now = Utc::now();

        let id = sqlx::query(
            "INSERT INTO departments (condominium_id, department_number, department_block, \
             number_habitants, department_owner, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(new.condominium_id)
        .bind(new.department_number)
        .bind(new.department_block)
        .bind(new.number_habitants)
        .bind(new.department_owner)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?
        .last_insert_rowid();

        Ok(Department {
            id,
            condominium_id: new.condominium_id,
            department_number: new.department_number,
            department_block: new.department_block,
            number_habitants: new.number_habitants,
            department_owner: new.department_owner.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Departments of one condominium, in insertion order.
    pub async fn list_for_condominium(
        &self,
        condominium_id: i64,
    ) -> Result<Vec<Department>, ApiError> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT * FROM departments WHERE condominium_id = ? ORDER BY id",
        )
        .bind(condominium_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(departments)
    }
}
