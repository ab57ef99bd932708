use chrono::{DateTime, Utc};
use shared::CondominiumName;

/// Top-level organization owning departments, financial entries, comments
/// and priority items. Deleting one cascades over everything it owns.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Condominium {
    pub id: i64,
    pub name_condominium: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Condominium {
    pub fn identity(&self) -> CondominiumName {
        CondominiumName {
            id: self.id,
            name_condominium: self.name_condominium.clone(),
        }
    }
}
