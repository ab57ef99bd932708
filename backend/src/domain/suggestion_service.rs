use shared::{CondominiumName, CondominiumSuggestions, SubmitSuggestions};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::NAME_MISMATCH;
use crate::error::ApiError;
use crate::storage::{CommentRepository, CondominiumRepository};

/// Suggestions and flaw reports: listed per condominium, submitted by
/// condominium name.
#[derive(Clone)]
pub struct SuggestionService {
    db: DbConnection,
    condominiums: CondominiumRepository,
    comments: CommentRepository,
}

impl SuggestionService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            condominiums: CondominiumRepository::new(db.clone()),
            comments: CommentRepository::new(db.clone()),
            db,
        }
    }

    /// Every condominium with its suggestion/flaw reports.
    pub async fn list(&self) -> Result<Vec<CondominiumSuggestions>, ApiError> {
        let mut results = Vec::new();

        for condominium in self.condominiums.list().await? {
            let condominium_suggestions = self
                .comments
                .list_for_condominium(condominium.id)
                .await?
                .iter()
                .map(|comment| comment.entry())
                .collect();

            results.push(CondominiumSuggestions {
                id: condominium.id,
                name_condominium: condominium.name_condominium,
                condominium_suggestions,
            });
        }

        Ok(results)
    }

    /// Persist every submitted report under the named condominium, all or
    /// nothing.
    pub async fn submit(&self, request: &SubmitSuggestions) -> Result<CondominiumName, ApiError> {
        if request.condominium_suggestions.is_empty() {
            return Err(ApiError::Validation(
                "At least one suggestion is required.".to_string(),
            ));
        }

        for suggestion in &request.condominium_suggestions {
            if suggestion.owner_department.trim().is_empty() {
                return Err(ApiError::Validation(
                    "Each suggestion requires an owner department.".to_string(),
                ));
            }
        }

        let mut tx = self.db.pool().begin().await.map_err(ApiError::from)?;

        let condominium = CondominiumRepository::find_by_name(&mut *tx, &request.name_condominium)
            .await?
            .ok_or_else(|| ApiError::Validation(NAME_MISMATCH.to_string()))?;

        for suggestion in &request.condominium_suggestions {
            CommentRepository::insert(&mut *tx, condominium.id, suggestion).await?;
        }

        tx.commit().await.map_err(ApiError::from)?;

        info!(
            "Recorded {} suggestions for {}",
            request.condominium_suggestions.len(),
            condominium.name_condominium
        );

        Ok(condominium.identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::NewSuggestion;

    async fn setup_test() -> (SuggestionService, CondominiumRepository) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        (SuggestionService::new(db.clone()), CondominiumRepository::new(db))
    }

    fn suggestion(owner: &str, comment_title: &str, flaw_title: &str) -> NewSuggestion {
        NewSuggestion {
            owner_department: owner.to_string(),
            comment_title: comment_title.to_string(),
            comment: if comment_title.is_empty() { String::new() } else { "body".to_string() },
            flaw_title: flaw_title.to_string(),
            flaw: if flaw_title.is_empty() { String::new() } else { "body".to_string() },
        }
    }

    #[tokio::test]
    async fn test_submit_against_unknown_name_is_a_validation_error() {
        let (service, _) = setup_test().await;

        let request = SubmitSuggestions {
            name_condominium: "Doesn't Exist".to_string(),
            condominium_suggestions: vec![suggestion("A-12", "More lights", "")],
        };

        let result = service.submit(&request).await;

        match result {
            Err(ApiError::Validation(message)) => assert_eq!(message, NAME_MISMATCH),
            other => panic!("Expected a validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submitting_two_reports_persists_both() {
        let (service, condominiums) = setup_test().await;
        condominiums.create("Maple Court").await.unwrap();

        let request = SubmitSuggestions {
            name_condominium: "Maple Court".to_string(),
            condominium_suggestions: vec![
                suggestion("A-12", "More lights", ""),
                suggestion("B-4", "", "Broken gate"),
            ],
        };
        service.submit(&request).await.unwrap();

        let listing = service.list().await.unwrap();
        assert_eq!(listing[0].condominium_suggestions.len(), 2);
    }

    #[tokio::test]
    async fn test_labels_follow_the_populated_titles() {
        let (service, condominiums) = setup_test().await;
        condominiums.create("Maple Court").await.unwrap();

        let request = SubmitSuggestions {
            name_condominium: "Maple Court".to_string(),
            condominium_suggestions: vec![
                suggestion("A-12", "", ""),
                suggestion("B-4", "More lights", "Broken gate"),
            ],
        };
        service.submit(&request).await.unwrap();

        let listing = service.list().await.unwrap();
        let entries = &listing[0].condominium_suggestions;

        assert_eq!(entries[0].label, "A-12");
        assert!(entries[1].label.contains("More lights"));
        assert!(entries[1].label.contains("Broken gate"));
    }

    #[tokio::test]
    async fn test_blank_owner_department_is_rejected() {
        let (service, condominiums) = setup_test().await;
        condominiums.create("Maple Court").await.unwrap();

        let request = SubmitSuggestions {
            name_condominium: "Maple Court".to_string(),
            condominium_suggestions: vec![suggestion(" ", "More lights", "")],
        };

        assert!(matches!(service.submit(&request).await, Err(ApiError::Validation(_))));
    }
}
