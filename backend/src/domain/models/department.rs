use chrono::{DateTime, Utc};
use shared::DepartmentSummary;

/// A physical unit within a condominium, with an assigned owner.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Department {
    pub id: i64,
    pub condominium_id: i64,
    pub department_number: i64,
    pub department_block: i64,
    pub number_habitants: i64,
    pub department_owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Department {
    pub fn summary(&self) -> DepartmentSummary {
        DepartmentSummary {
            department_number: self.department_number,
            department_block: self.department_block,
            number_habitants: self.number_habitants,
            department_owner: self.department_owner.clone(),
        }
    }
}
