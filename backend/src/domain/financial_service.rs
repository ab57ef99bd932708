use shared::{CondominiumFinancials, CondominiumName, SubmitFinancials};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::models::Condominium;
use crate::domain::NAME_MISMATCH;
use crate::error::ApiError;
use crate::storage::{CondominiumRepository, FinancialRepository};

/// Financial aggregates: read per condominium, write by resolving the
/// parent by name.
#[derive(Clone)]
pub struct FinancialService {
    db: DbConnection,
    condominiums: CondominiumRepository,
    financials: FinancialRepository,
}

impl FinancialService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            condominiums: CondominiumRepository::new(db.clone()),
            financials: FinancialRepository::new(db.clone()),
            db,
        }
    }

    /// Every condominium with its financial entries.
    pub async fn list(&self) -> Result<Vec<CondominiumFinancials>, ApiError> {
        let mut results = Vec::new();

        for condominium in self.condominiums.list().await? {
            results.push(self.render(condominium).await?);
        }

        Ok(results)
    }

    /// One condominium's entries, addressed by primary key.
    pub async fn for_condominium(&self, id: i64) -> Result<CondominiumFinancials, ApiError> {
        let condominium = self
            .condominiums
            .get(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Condominium not found: {id}")))?;

        self.render(condominium).await
    }

    async fn render(&self, condominium: Condominium) -> Result<CondominiumFinancials, ApiError> {
        let financial_status = self
            .financials
            .list_for_condominium(condominium.id)
            .await?
            .iter()
            .map(|stat| stat.entry())
            .collect();

        Ok(CondominiumFinancials {
            id: condominium.id,
            name_condominium: condominium.name_condominium,
            financial_status,
        })
    }

    /// Persist every submitted entry under the named condominium, all or
    /// nothing.
    pub async fn submit(&self, request: &SubmitFinancials) -> Result<CondominiumName, ApiError> {
        if request.financial_status.is_empty() {
            return Err(ApiError::Validation(
                "At least one financial entry is required.".to_string(),
            ));
        }

        for entry in &request.financial_status {
            if entry.income < 0.0 || entry.expenses < 0.0 {
                return Err(ApiError::Validation(
                    "Income and expenses cannot be negative.".to_string(),
                ));
            }
        }

        let mut tx = self.db.pool().begin().await.map_err(ApiError::from)?;

        let condominium = CondominiumRepository::find_by_name(&mut *tx, &request.name_condominium)
            .await?
            .ok_or_else(|| ApiError::Validation(NAME_MISMATCH.to_string()))?;

        for entry in &request.financial_status {
            FinancialRepository::insert(&mut *tx, condominium.id, entry).await?;
        }

        tx.commit().await.map_err(ApiError::from)?;

        info!(
            "Recorded {} financial entries for {}",
            request.financial_status.len(),
            condominium.name_condominium
        );

        Ok(condominium.identity())
    }
}
