use chrono::{DateTime, Utc};
use shared::FinancialEntry;

/// One financial statement line recorded for a condominium.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FinancialStat {
    pub id: i64,
    pub condominium_id: i64,
    pub type_detail: String,
    pub income: f64,
    pub expenses: f64,
    pub details: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FinancialStat {
    pub fn entry(&self) -> FinancialEntry {
        FinancialEntry {
            created_at: self.created_at,
            type_detail: self.type_detail.clone(),
            income: self.income,
            expenses: self.expenses,
            details: self.details.clone(),
        }
    }
}
