use chrono::{DateTime, Utc};
use shared::{CondominiumName, PriorityItemDetail, PriorityItemSummary, ProgressStatus};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// A prioritized improvement or upgrade item. Progress is a single
/// three-state value rather than independent flags.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityItem {
    pub id: i64,
    pub condominium_id: i64,
    pub name: String,
    pub detail: String,
    pub priority: bool,
    pub upgrade: bool,
    pub status: ProgressStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Manual mapping: `status` is persisted as TEXT and has no sqlx type of
// its own.
impl<'r> sqlx::FromRow<'r, SqliteRow> for PriorityItem {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status = ProgressStatus::parse(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: format!("unknown progress status: {status}").into(),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            condominium_id: row.try_get("condominium_id")?,
            name: row.try_get("name")?,
            detail: row.try_get("detail")?,
            priority: row.try_get("priority")?,
            upgrade: row.try_get("upgrade")?,
            status,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PriorityItem {
    pub fn summary(&self) -> PriorityItemSummary {
        PriorityItemSummary {
            id: self.id,
            name: self.name.clone(),
            detail: self.detail.clone(),
            priority: self.priority,
            upgrade: self.upgrade,
            status: self.status,
        }
    }

    /// The item plus its parent's identifying fields.
    pub fn detail_with(&self, condominium: CondominiumName) -> PriorityItemDetail {
        PriorityItemDetail {
            id: self.id,
            name: self.name.clone(),
            detail: self.detail.clone(),
            priority: self.priority,
            upgrade: self.upgrade,
            status: self.status,
            condominium_data: condominium,
        }
    }
}
