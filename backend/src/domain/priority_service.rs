use shared::{CondominiumName, CondominiumPriorities, PriorityItemDetail, SubmitPriorities};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::NAME_MISMATCH;
use crate::error::ApiError;
use crate::storage::{CondominiumRepository, PriorityRepository};

/// Priority and upgrade items: listed per condominium, retrieved with the
/// parent's identifying fields, submitted by condominium name.
#[derive(Clone)]
pub struct PriorityService {
    db: DbConnection,
    condominiums: CondominiumRepository,
    priorities: PriorityRepository,
}

impl PriorityService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            condominiums: CondominiumRepository::new(db.clone()),
            priorities: PriorityRepository::new(db.clone()),
            db,
        }
    }

    /// Every condominium with its priority items.
    pub async fn list(&self) -> Result<Vec<CondominiumPriorities>, ApiError> {
        let mut results = Vec::new();

        for condominium in self.condominiums.list().await? {
            let condominium_data = self
                .priorities
                .list_for_condominium(condominium.id)
                .await?
                .iter()
                .map(|item| item.summary())
                .collect();

            results.push(CondominiumPriorities {
                id: condominium.id,
                name_condominium: condominium.name_condominium,
                condominium_data,
            });
        }

        Ok(results)
    }

    /// A single item with its parent's identity, never a partial object.
    pub async fn get(&self, id: i64) -> Result<PriorityItemDetail, ApiError> {
        let item = self
            .priorities
            .get(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Priority or upgrade item not found: {id}")))?;

        let condominium = self
            .condominiums
            .get(item.condominium_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("Condominium not found: {}", item.condominium_id))
            })?;

        Ok(item.detail_with(condominium.identity()))
    }

    /// Persist every submitted item under the named condominium, all or
    /// nothing.
    pub async fn submit(&self, request: &SubmitPriorities) -> Result<CondominiumName, ApiError> {
        if request.condominium_data.is_empty() {
            return Err(ApiError::Validation(
                "At least one priority or upgrade item is required.".to_string(),
            ));
        }

        for item in &request.condominium_data {
            if item.name.trim().is_empty() {
                return Err(ApiError::Validation("Each item requires a name.".to_string()));
            }
        }

        let mut tx = self.db.pool().begin().await.map_err(ApiError::from)?;

        let condominium = CondominiumRepository::find_by_name(&mut *tx, &request.name_condominium)
            .await?
            .ok_or_else(|| ApiError::Validation(NAME_MISMATCH.to_string()))?;

        for item in &request.condominium_data {
            PriorityRepository::insert(&mut *tx, condominium.id, item).await?;
        }

        tx.commit().await.map_err(ApiError::from)?;

        info!(
            "Recorded {} priority items for {}",
            request.condominium_data.len(),
            condominium.name_condominium
        );

        Ok(condominium.identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{NewPriorityItem, ProgressStatus};

    async fn setup_test() -> (PriorityService, CondominiumRepository) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        (PriorityService::new(db.clone()), CondominiumRepository::new(db))
    }

    fn item(name: &str, status: ProgressStatus) -> NewPriorityItem {
        NewPriorityItem {
            name: name.to_string(),
            detail: format!("{name} detail"),
            priority: false,
            upgrade: false,
            status,
        }
    }

    #[tokio::test]
    async fn test_get_missing_item_is_not_found() {
        let (service, _) = setup_test().await;

        let result = service.get(4242).await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_flattens_the_parent_identity() {
        let (service, condominiums) = setup_test().await;
        condominiums.create("Maple Court").await.unwrap();

        let request = SubmitPriorities {
            name_condominium: "Maple Court".to_string(),
            condominium_data: vec![item("Repaint lobby", ProgressStatus::Doing)],
        };
        service.submit(&request).await.unwrap();

        let listing = service.list().await.unwrap();
        let id = listing[0].condominium_data[0].id;

        let detail = service.get(id).await.unwrap();
        assert_eq!(detail.name, "Repaint lobby");
        assert_eq!(detail.status, ProgressStatus::Doing);
        assert_eq!(detail.condominium_data.name_condominium, "Maple Court");
    }

    #[tokio::test]
    async fn test_submit_against_unknown_name_is_a_validation_error() {
        let (service, _) = setup_test().await;

        let request = SubmitPriorities {
            name_condominium: "Doesn't Exist".to_string(),
            condominium_data: vec![item("Repaint lobby", ProgressStatus::ToDo)],
        };

        let result = service.submit(&request).await;

        match result {
            Err(ApiError::Validation(message)) => assert_eq!(message, NAME_MISMATCH),
            other => panic!("Expected a validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submitting_two_items_persists_both() {
        let (service, condominiums) = setup_test().await;
        condominiums.create("Maple Court").await.unwrap();

        let request = SubmitPriorities {
            name_condominium: "Maple Court".to_string(),
            condominium_data: vec![
                item("Repaint lobby", ProgressStatus::ToDo),
                item("New elevator", ProgressStatus::Done),
            ],
        };
        service.submit(&request).await.unwrap();

        let listing = service.list().await.unwrap();
        assert_eq!(listing[0].condominium_data.len(), 2);
    }

    #[tokio::test]
    async fn test_status_defaults_to_to_do() {
        let (service, condominiums) = setup_test().await;
        condominiums.create("Maple Court").await.unwrap();

        let request = SubmitPriorities {
            name_condominium: "Maple Court".to_string(),
            condominium_data: vec![NewPriorityItem {
                name: "Repaint lobby".to_string(),
                detail: "Entrance walls".to_string(),
                priority: true,
                upgrade: false,
                status: ProgressStatus::default(),
            }],
        };
        service.submit(&request).await.unwrap();

        let listing = service.list().await.unwrap();
        assert_eq!(listing[0].condominium_data[0].status, ProgressStatus::ToDo);
        assert!(listing[0].condominium_data[0].priority);
    }

    #[tokio::test]
    async fn test_blank_item_name_is_rejected() {
        let (service, condominiums) = setup_test().await;
        condominiums.create("Maple Court").await.unwrap();

        let request = SubmitPriorities {
            name_condominium: "Maple Court".to_string(),
            condominium_data: vec![item("  ", ProgressStatus::ToDo)],
        };

        assert!(matches!(service.submit(&request).await, Err(ApiError::Validation(_))));
    }
}
