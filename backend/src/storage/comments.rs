use chrono::Utc;
use shared::NewSuggestion;
use sqlx::SqliteExecutor;

use crate::db::DbConnection;
use crate::domain::models::Comment;
use crate::error::ApiError;

#[derive(Clone)]
pub struct CommentRepository {
    db: DbConnection,
}

impl CommentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert one suggestion/flaw report, usable inside a transaction.
    pub(crate) async fn insert<'e, E>(
        executor: E,
        condominium_id: i64,
        suggestion: &NewSuggestion,
    ) -> Result<Comment, ApiError>
    where
        E: SqliteExecutor<'e>,
    {
        let now = Utc::now();

        let id = sqlx::query(
            "INSERT INTO comments (condominium_id, owner_department, comment_title, comment, \
             flaw_title, flaw, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(condominium_id)
        .bind(&suggestion.owner_department)
        .bind(&suggestion.comment_title)
        .bind(&suggestion.comment)
        .bind(&suggestion.flaw_title)
        .bind(&suggestion.flaw)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?
        .last_insert_rowid();

        Ok(Comment {
            id,
            condominium_id,
            owner_department: suggestion.owner_department.clone(),
            comment_title: suggestion.comment_title.clone(),
            comment: suggestion.comment.clone(),
            flaw_title: suggestion.flaw_title.clone(),
            flaw: suggestion.flaw.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reports filed against one condominium, in insertion order.
    pub async fn list_for_condominium(&self, condominium_id: i64) -> Result<Vec<Comment>, ApiError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE condominium_id = ? ORDER BY id",
        )
        .bind(condominium_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(comments)
    }
}
