use chrono::Utc;
use sqlx::SqliteExecutor;

use crate::db::DbConnection;
use crate::domain::models::HabitantProfile;
use crate::error::ApiError;

/// Links a user account to a department, with the two contact numbers.
pub struct NewProfile<'a> {
    pub user_id: i64,
    pub department_id: i64,
    pub p_number: &'a str,
    pub p_number_emergency: &'a str,
}

#[derive(Clone)]
pub struct ProfileRepository {
    db: DbConnection,
}

impl ProfileRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: &NewProfile<'_>) -> Result<HabitantProfile, ApiError> {
        Self::insert(self.db.pool(), new).await
    }

    /// Insert a profile, usable inside a transaction. Both relations are
    /// one-to-one; a second profile for the same user or department is a
    /// constraint violation.
    pub(crate) async fn insert<'e, E>(
        executor: E,
        new: &NewProfile<'_>,
    ) -> Result<HabitantProfile, ApiError>
    where
        E: SqliteExecutor<'e>,
    {
        let now = Utc::now();

        let id = sqlx::query(
            "INSERT INTO habitant_profiles (user_id, department_id, p_number, \
             p_number_emergency, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(new.user_id)
        .bind(new.department_id)
        .bind(new.p_number)
        .bind(new.p_number_emergency)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?
        .last_insert_rowid();

        Ok(HabitantProfile {
            id,
            user_id: new.user_id,
            department_id: new.department_id,
            p_number: new.p_number.to_string(),
            p_number_emergency: new.p_number_emergency.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn find_by_user(&self, user_id: i64) -> Result<Option<HabitantProfile>, ApiError> {
        let profile = sqlx::query_as::<_, HabitantProfile>(
            "SELECT * FROM habitant_profiles WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::condominiums::CondominiumRepository;
    use crate::storage::departments::{DepartmentRepository, NewDepartment};
    use crate::storage::users::{NewUser, UserRepository};

    async fn setup_test() -> (ProfileRepository, i64, i64, DbConnection) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        let user = UserRepository::new(db.clone())
            .create(&NewUser {
                username: "jdoe",
                first_name: "Jane Doe",
                last_name: "",
                email: "jdoe@example.com",
                password_hash: "$argon2id$fake",
                is_staff: false,
            })
            .await
            .unwrap();

        let condominium = CondominiumRepository::new(db.clone())
            .create("Maple Court")
            .await
            .unwrap();
        let department = DepartmentRepository::new(db.clone())
            .create(&NewDepartment {
                condominium_id: condominium.id,
                department_number: 12,
                department_block: 3,
                number_habitants: 2,
                department_owner: "Jane Doe",
            })
            .await
            .unwrap();

        (ProfileRepository::new(db.clone()), user.id, department.id, db)
    }

    #[tokio::test]
    async fn test_create_and_find_by_user() {
        let (repository, user_id, department_id, _db) = setup_test().await;

        let created = repository
            .create(&NewProfile {
                user_id,
                department_id,
                p_number: "+15551234567",
                p_number_emergency: "+15557654321",
            })
            .await
            .unwrap();

        let found = repository.find_by_user(user_id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_second_profile_for_the_same_user_is_rejected() {
        let (repository, user_id, department_id, db) = setup_test().await;

        repository
            .create(&NewProfile {
                user_id,
                department_id,
                p_number: "+15551234567",
                p_number_emergency: "+15557654321",
            })
            .await
            .unwrap();

        // A fresh department keeps the department relation unique; the
        // user relation is the one violated.
        let condominium = CondominiumRepository::new(db.clone())
            .create("Oak Plaza")
            .await
            .unwrap();
        let other_department = DepartmentRepository::new(db)
            .create(&NewDepartment {
                condominium_id: condominium.id,
                department_number: 7,
                department_block: 1,
                number_habitants: 1,
                department_owner: "Jane Doe",
            })
            .await
            .unwrap();

        let duplicate = repository
            .create(&NewProfile {
                user_id,
                department_id: other_department.id,
                p_number: "+15551234567",
                p_number_emergency: "+15557654321",
            })
            .await;

        assert!(matches!(duplicate, Err(ApiError::Constraint(_))));
    }
}
