use shared::{CondominiumDepartments, CondominiumName};
use tracing::info;

use crate::db::DbConnection;
use crate::error::ApiError;
use crate::storage::{CondominiumRepository, DepartmentRepository};

/// Read-side aggregation over condominiums and their departments.
#[derive(Clone)]
pub struct CondominiumService {
    condominiums: CondominiumRepository,
    departments: DepartmentRepository,
}

impl CondominiumService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            condominiums: CondominiumRepository::new(db.clone()),
            departments: DepartmentRepository::new(db),
        }
    }

    /// Lightweight (id, name) listing for selection UIs.
    pub async fn list_names(&self) -> Result<Vec<CondominiumName>, ApiError> {
        let names: Vec<CondominiumName> = self
            .condominiums
            .list()
            .await?
            .iter()
            .map(|condominium| condominium.identity())
            .collect();

        info!("Listed {} condominium names", names.len());

        Ok(names)
    }

    /// Every condominium with its departments rendered.
    pub async fn list_with_departments(&self) -> Result<Vec<CondominiumDepartments>, ApiError> {
        let mut results = Vec::new();

        for condominium in self.condominiums.list().await? {
            let departments = self
                .departments
                .list_for_condominium(condominium.id)
                .await?
                .iter()
                .map(|department| department.summary())
                .collect();

            results.push(CondominiumDepartments {
                id: condominium.id,
                name_condominium: condominium.name_condominium,
                departments,
            });
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::NewDepartment;

    async fn setup_test() -> (CondominiumService, CondominiumRepository, DepartmentRepository) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        (
            CondominiumService::new(db.clone()),
            CondominiumRepository::new(db.clone()),
            DepartmentRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_list_names_is_lightweight() {
        let (service, condominiums, _) = setup_test().await;
        condominiums.create("Maple Court").await.unwrap();
        condominiums.create("Oak Plaza").await.unwrap();

        let names = service.list_names().await.unwrap();

        assert_eq!(names.len(), 2);
        assert!(names.iter().any(|n| n.name_condominium == "Maple Court"));
        assert!(names.iter().any(|n| n.name_condominium == "Oak Plaza"));
    }

    #[tokio::test]
    async fn test_list_with_departments_nests_each_unit() {
        let (service, condominiums, departments) = setup_test().await;
        let condominium = condominiums.create("Maple Court").await.unwrap();
        departments
            .create(&NewDepartment {
                condominium_id: condominium.id,
                department_number: 12,
                department_block: 3,
                number_habitants: 2,
                department_owner: "Jane Doe",
            })
            .await
            .unwrap();

        let listing = service.list_with_departments().await.unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].departments.len(), 1);
        assert_eq!(listing[0].departments[0].department_owner, "Jane Doe");
        assert_eq!(listing[0].departments[0].department_number, 12);
    }

    #[tokio::test]
    async fn test_condominium_without_departments_lists_empty() {
        let (service, condominiums, _) = setup_test().await;
        condominiums.create("Maple Court").await.unwrap();

        let listing = service.list_with_departments().await.unwrap();

        assert_eq!(listing.len(), 1);
        assert!(listing[0].departments.is_empty());
    }
}
